pub mod parser;

pub use parser::{parse, parse_with_census, parse_with_options, ParseOptions, SyntaxError};


// Integration tests are in the tests/ directory
