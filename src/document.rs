use crate::dom::{Dom, NodeId};

/// Index of a document inside its page: the top document, a frame document
/// or a nested layer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub(crate) usize);

/// A located element. Two handles are equal exactly when they name the same
/// node of the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle {
    pub(crate) document: DocumentId,
    pub(crate) node: NodeId,
}

impl ElementHandle {
    pub(crate) fn new(document: DocumentId, node: NodeId) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub(crate) dom: Dom,
    /// Nested layer sub-documents, searched in order by the resolver.
    pub(crate) layers: Vec<DocumentId>,
    pub(crate) scroll_left: i64,
    pub(crate) scroll_top: i64,
}

impl Document {
    pub(crate) fn new(dom: Dom) -> Self {
        Self {
            dom,
            layers: Vec::new(),
            scroll_left: 0,
            scroll_top: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) name: String,
    pub(crate) document: DocumentId,
}
