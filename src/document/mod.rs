//! The current document and its lifecycle.
//!
//! The net model itself lives outside this crate; the holder only needs to
//! know whether a net is blank, which [`NetShape`] answers.

mod format;
mod holder;
mod loader;

pub use format::*;
pub use holder::*;
pub use loader::*;

use std::fmt;
use std::sync::Arc;

/// The two properties of a net the core observes.
pub trait NetShape {
    fn node_count(&self) -> usize;

    fn arc_count(&self) -> usize;

    /// No nodes and no arcs.
    fn is_blank(&self) -> bool {
        self.node_count() == 0 && self.arc_count() == 0
    }
}

/// The current document: a shared net, or the empty sentinel.
///
/// Blank nets are always normalized to [`Document::Empty`], so `is_empty` is
/// the only check a consumer needs.
pub enum Document<N> {
    Empty,
    Net(Arc<N>),
}

impl<N> Clone for Document<N> {
    fn clone(&self) -> Self {
        match self {
            Document::Empty => Document::Empty,
            Document::Net(net) => Document::Net(Arc::clone(net)),
        }
    }
}

impl<N> Default for Document<N> {
    fn default() -> Self {
        Document::Empty
    }
}

impl<N> fmt::Debug for Document<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Empty => f.write_str("Document::Empty"),
            Document::Net(net) => write!(f, "Document::Net({:p})", Arc::as_ptr(net)),
        }
    }
}

impl<N: NetShape> Document<N> {
    /// Normalize a blank net to the empty sentinel.
    pub fn normalized(self) -> Self {
        match self {
            Document::Net(net) if net.is_blank() => Document::Empty,
            other => other,
        }
    }

    pub fn node_count(&self) -> usize {
        self.net().map_or(0, NetShape::node_count)
    }

    pub fn arc_count(&self) -> usize {
        self.net().map_or(0, NetShape::arc_count)
    }
}

impl<N> Document<N> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Document::Empty)
    }

    pub fn net(&self) -> Option<&N> {
        match self {
            Document::Empty => None,
            Document::Net(net) => Some(net),
        }
    }

    /// Whether both documents are the same net instance (or both empty).
    pub fn same_as(&self, other: &Document<N>) -> bool {
        match (self, other) {
            (Document::Empty, Document::Empty) => true,
            (Document::Net(a), Document::Net(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<N> From<N> for Document<N> {
    fn from(net: N) -> Self {
        Document::Net(Arc::new(net))
    }
}

impl<N> From<Arc<N>> for Document<N> {
    fn from(net: Arc<N>) -> Self {
        Document::Net(net)
    }
}

impl<N> From<Option<N>> for Document<N> {
    fn from(net: Option<N>) -> Self {
        net.map_or(Document::Empty, Document::from)
    }
}
