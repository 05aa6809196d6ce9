/// Read position into the expression text.
///
/// Whitespace never reaches the parser: the cursor always rests on a
/// non-whitespace character or at the end, so `"1 2"` reads exactly like
/// `"12"`. Positions are byte offsets into the text the cursor was built on.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut cursor = Cursor { source, offset: 0 };
        cursor.skip_whitespace();
        cursor
    }

    /// The next significant character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    /// Consume the next significant character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        self.skip_whitespace();
        Some(ch)
    }

    /// Consume the next character if `pred` accepts it.
    pub fn bump_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(ch) if pred(ch) => self.bump(),
            _ => None,
        }
    }

    /// Byte offset of the next significant character (or the text length at the end).
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.source.len()
    }

    /// True at the end of input or on a `)`, the two places a sequence stops.
    pub fn at_sequence_end(&self) -> bool {
        matches!(self.peek(), None | Some(')'))
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.offset..];
        self.offset += rest.len() - rest.trim_start().len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_invisible() {
        let mut cursor = Cursor::new("  1 \t+\n 2 ");
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.bump(), Some('1'));
        assert_eq!(cursor.peek(), Some('+'));
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.bump(), Some('+'));
        assert_eq!(cursor.bump(), Some('2'));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn test_bump_if() {
        let mut cursor = Cursor::new("7x");
        assert_eq!(cursor.bump_if(|c| c == 'x'), None);
        assert_eq!(cursor.bump_if(|c| c.is_ascii_digit()), Some('7'));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_sequence_end() {
        assert!(Cursor::new("").at_sequence_end());
        assert!(Cursor::new("   ").at_sequence_end());
        assert!(Cursor::new(" )").at_sequence_end());
        assert!(!Cursor::new("1)").at_sequence_end());
    }

    #[test]
    fn test_multibyte_positions() {
        let mut cursor = Cursor::new("é1");
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.position(), 2);
    }
}
