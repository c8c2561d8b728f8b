use super::{Dom, NodeId};

/// Mock layout for one element. There is no layout engine: offsets are zero
/// until the host sets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LayoutBox {
    pub(crate) offset_left: i64,
    pub(crate) offset_top: i64,
}

impl Dom {
    pub(crate) fn offset_left(&self, node_id: NodeId) -> i64 {
        self.element(node_id)
            .map(|element| element.layout.offset_left)
            .unwrap_or(0)
    }

    pub(crate) fn offset_top(&self, node_id: NodeId) -> i64 {
        self.element(node_id)
            .map(|element| element.layout.offset_top)
            .unwrap_or(0)
    }

    pub(crate) fn set_offset(&mut self, node_id: NodeId, left: i64, top: i64) -> bool {
        let Some(element) = self.element_mut(node_id) else {
            return false;
        };
        element.layout = LayoutBox {
            offset_left: left,
            offset_top: top,
        };
        true
    }

    /// Nearest positioned ancestor, or a table cell/table ancestor, else `body`.
    pub(crate) fn offset_parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.element(node_id)?;
        if self.has_tag(node_id, "body") || self.has_tag(node_id, "html") {
            return None;
        }

        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.element(current).is_none() {
                break;
            }
            if self.has_tag(current, "body") {
                return Some(current);
            }
            if self.is_positioned(current)
                || self.has_tag(current, "td")
                || self.has_tag(current, "th")
                || self.has_tag(current, "table")
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }

        // Attached to the document but outside any body: fall back to it.
        if cursor == Some(self.root) {
            return self.body().filter(|body| *body != node_id);
        }
        None
    }

    fn is_positioned(&self, node_id: NodeId) -> bool {
        self.style_get(node_id, "position")
            .is_some_and(|position| !position.trim().eq_ignore_ascii_case("static"))
    }
}
