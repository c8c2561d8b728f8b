use crate::document::ElementHandle;
use crate::host::LayerHost;

/// Enables hover auto-hide on every resolvable name. Returns how many
/// elements are now enabled by this call (already-enabled ones count too).
pub(crate) fn auto_hide<H: LayerHost + ?Sized>(host: &mut H, names: &[String]) -> usize {
    let mut enabled = 0usize;
    for name in names {
        if let Some(element) = host.resolve(name) {
            host.watch_pointer_leave(element);
            enabled += 1;
        }
    }
    enabled
}

/// True when the pointer moved from `current` to somewhere outside it.
///
/// `related` is where the pointer went; `None` means it left the document.
pub(crate) fn pointer_left(
    current: ElementHandle,
    related: Option<ElementHandle>,
    parent: impl Fn(ElementHandle) -> Option<ElementHandle>,
) -> bool {
    let mut cursor = related;
    while let Some(node) = cursor {
        if node == current {
            return false;
        }
        cursor = parent(node);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use crate::dom::NodeId;

    fn handle(n: usize) -> ElementHandle {
        ElementHandle::new(DocumentId(0), NodeId(n))
    }

    // 1 > 2 > 3, and 4 is a sibling of 1.
    fn parent(node: ElementHandle) -> Option<ElementHandle> {
        match node.node.0 {
            2 => Some(handle(1)),
            3 => Some(handle(2)),
            _ => None,
        }
    }

    #[test]
    fn moving_into_descendants_stays_inside() {
        assert!(!pointer_left(handle(1), Some(handle(3)), parent));
        assert!(!pointer_left(handle(1), Some(handle(1)), parent));
    }

    #[test]
    fn moving_to_siblings_or_out_of_document_leaves() {
        assert!(pointer_left(handle(1), Some(handle(4)), parent));
        assert!(pointer_left(handle(2), Some(handle(1)), parent));
        assert!(pointer_left(handle(1), None, parent));
    }

    #[test]
    fn other_documents_are_outside() {
        let foreign = ElementHandle::new(DocumentId(1), NodeId(1));
        assert!(pointer_left(handle(1), Some(foreign), parent));
    }
}
