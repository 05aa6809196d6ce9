//! Live-node accounting for leak audits.
//!
//! A [`NodeCensus`] is a shared tally. The parser enrolls every node it builds,
//! and each node holds the resulting [`CensusToken`] until it is dropped, so
//! [`NodeCensus::live`] reports how many nodes are still reachable from trees
//! that have not been released. Nodes built without a census carry an inert
//! token and cost nothing beyond the empty slot.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared count of live, enrolled expression nodes.
#[derive(Clone, Default)]
pub struct NodeCensus {
    live: Arc<AtomicUsize>,
}

impl NodeCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enrolled nodes that have not been dropped yet.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Registers one more node and returns the token that keeps it counted.
    pub fn enroll(&self) -> CensusToken {
        self.live.fetch_add(1, Ordering::AcqRel);
        CensusToken(Some(Arc::clone(&self.live)))
    }
}

impl fmt::Debug for NodeCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCensus")
            .field("live", &self.live())
            .finish()
    }
}

/// Membership of a single node in a [`NodeCensus`].
///
/// Cloning a tracked token enrolls the clone as a new node; dropping releases it.
#[derive(Default)]
pub struct CensusToken(Option<Arc<AtomicUsize>>);

impl CensusToken {
    /// A token that belongs to no census.
    pub fn untracked() -> Self {
        Self(None)
    }

    pub fn is_tracked(&self) -> bool {
        self.0.is_some()
    }
}

impl Clone for CensusToken {
    fn clone(&self) -> Self {
        match &self.0 {
            Some(live) => {
                live.fetch_add(1, Ordering::AcqRel);
                Self(Some(Arc::clone(live)))
            }
            None => Self(None),
        }
    }
}

impl Drop for CensusToken {
    fn drop(&mut self) {
        if let Some(live) = &self.0 {
            live.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

// Tokens are bookkeeping only and never distinguish two otherwise equal trees.
impl PartialEq for CensusToken {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for CensusToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tracked() {
            f.write_str("CensusToken(tracked)")
        } else {
            f.write_str("CensusToken(untracked)")
        }
    }
}
