use crate::host::LayerHost;

// Offsets at or beyond this magnitude survive pointer anchoring.
const POINTER_OFFSET_THRESHOLD: u64 = 1000;
const POINTER_BIAS_RIGHT: i64 = -10;
const POINTER_BIAS_LEFT_GAP: i64 = 5;

/// One positioning request: place `target` at the absolute position of
/// `reference` shifted by `(dx, dy)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapRequest {
    pub reference: String,
    pub target: String,
    pub dx: i64,
    pub dy: i64,
}

impl SnapRequest {
    pub fn new(reference: &str, target: &str, dx: i64, dy: i64) -> Self {
        Self {
            reference: reference.to_string(),
            target: target.to_string(),
            dx,
            dy,
        }
    }
}

/// Where the position was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The reference's offset-parent chain.
    OffsetChain,
    /// Root-level reference with inline `left`/`top` already set.
    Style,
    /// Root-level reference without inline coordinates: the current pointer.
    Pointer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ReferenceNotFound(String),
    TargetNotFound(String),
    /// Root-level reference with no inline coordinates and no pointer event.
    NoAnchor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapOutcome {
    Placed { left: i64, top: i64, anchor: Anchor },
    Skipped(SkipReason),
}

pub(crate) fn snap<H: LayerHost + ?Sized>(host: &mut H, request: &SnapRequest) -> SnapOutcome {
    let Some(reference) = host.resolve(&request.reference) else {
        return SnapOutcome::Skipped(SkipReason::ReferenceNotFound(request.reference.clone()));
    };
    let Some(target) = host.resolve(&request.target) else {
        return SnapOutcome::Skipped(SkipReason::TargetNotFound(request.target.clone()));
    };

    let (x, y) = host.absolute_position(reference);
    let (mut dx, mut dy) = (request.dx, request.dy);

    let (left, top, anchor) = if x != 0 || y != 0 {
        (x, y, Anchor::OffsetChain)
    } else if let Some(style_left) = host
        .style_value(reference, "left")
        .and_then(|value| crate::dom::parse_int_prefix(&value))
    {
        let style_top = host
            .style_value(reference, "top")
            .and_then(|value| crate::dom::parse_int_prefix(&value))
            .unwrap_or(0);
        (style_left, style_top, Anchor::Style)
    } else {
        let Some(pointer) = host.pointer() else {
            return SnapOutcome::Skipped(SkipReason::NoAnchor);
        };
        let width = host
            .style_value(target, "width")
            .and_then(|value| crate::dom::parse_int_prefix(&value))
            .unwrap_or(0);
        let bias = if dx < 0 {
            (-POINTER_BIAS_LEFT_GAP).saturating_sub(width)
        } else {
            POINTER_BIAS_RIGHT
        };
        if dx.unsigned_abs() < POINTER_OFFSET_THRESHOLD {
            dx = 0;
        }
        if dy.unsigned_abs() < POINTER_OFFSET_THRESHOLD {
            dy = 0;
        }
        let (scroll_left, scroll_top) = host.scroll_offset(reference.document());
        (
            scroll_left
                .saturating_add(pointer.client_x)
                .saturating_add(bias),
            scroll_top.saturating_add(pointer.client_y),
            Anchor::Pointer,
        )
    };

    let (left, top) = (left.saturating_add(dx), top.saturating_add(dy));
    host.set_style_position(target, left, top);
    SnapOutcome::Placed { left, top, anchor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentId, ElementHandle};
    use crate::dom::NodeId;
    use crate::events::PointerEvent;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeHost {
        names: HashMap<String, ElementHandle>,
        positions: HashMap<ElementHandle, (i64, i64)>,
        styles: HashMap<(ElementHandle, String), String>,
        pointer: Option<PointerEvent>,
        scroll: (i64, i64),
    }

    impl FakeHost {
        fn with(names: &[&str]) -> Self {
            let mut host = Self::default();
            for (idx, name) in names.iter().enumerate() {
                host.names
                    .insert(name.to_string(), ElementHandle::new(DocumentId(0), NodeId(idx + 1)));
            }
            host
        }

        fn handle(&self, name: &str) -> ElementHandle {
            self.names[name]
        }

        fn style(&self, name: &str, property: &str) -> Option<&str> {
            self.styles
                .get(&(self.handle(name), property.to_string()))
                .map(String::as_str)
        }
    }

    impl LayerHost for FakeHost {
        fn resolve(&self, name: &str) -> Option<ElementHandle> {
            self.names.get(name).copied()
        }

        fn absolute_position(&self, element: ElementHandle) -> (i64, i64) {
            self.positions.get(&element).copied().unwrap_or((0, 0))
        }

        fn set_style_position(&mut self, element: ElementHandle, left: i64, top: i64) {
            self.set_style_value(element, "left", &format!("{left}px"));
            self.set_style_value(element, "top", &format!("{top}px"));
        }

        fn watch_pointer_leave(&mut self, _element: ElementHandle) -> bool {
            true
        }

        fn style_value(&self, element: ElementHandle, property: &str) -> Option<String> {
            self.styles.get(&(element, property.to_string())).cloned()
        }

        fn set_style_value(&mut self, element: ElementHandle, property: &str, value: &str) {
            self.styles
                .insert((element, property.to_string()), value.to_string());
        }

        fn scroll_offset(&self, _document: DocumentId) -> (i64, i64) {
            self.scroll
        }

        fn pointer(&self) -> Option<PointerEvent> {
            self.pointer
        }
    }

    #[test]
    fn offset_chain_plus_offsets() {
        let mut host = FakeHost::with(&["ref", "tip"]);
        let reference = host.handle("ref");
        host.positions.insert(reference, (100, 50));
        let outcome = snap(&mut host, &SnapRequest::new("ref", "tip", 10, 20));
        assert_eq!(
            outcome,
            SnapOutcome::Placed {
                left: 110,
                top: 70,
                anchor: Anchor::OffsetChain
            }
        );
        assert_eq!(host.style("tip", "left"), Some("110px"));
        assert_eq!(host.style("tip", "top"), Some("70px"));
    }

    #[test]
    fn root_level_reference_uses_its_style_coordinates() {
        let mut host = FakeHost::with(&["ref", "tip"]);
        let reference = host.handle("ref");
        host.set_style_value(reference, "left", "30px");
        host.set_style_value(reference, "top", "40px");
        host.pointer = Some(PointerEvent::new(500, 500));
        let outcome = snap(&mut host, &SnapRequest::new("ref", "tip", 0, 0));
        assert_eq!(
            outcome,
            SnapOutcome::Placed {
                left: 30,
                top: 40,
                anchor: Anchor::Style
            }
        );
    }

    #[test]
    fn pointer_anchor_biases_by_direction_and_width() {
        let mut host = FakeHost::with(&["ref", "tip"]);
        let tip = host.handle("tip");
        host.set_style_value(tip, "width", "120px");
        host.pointer = Some(PointerEvent::new(200, 80));
        host.scroll = (5, 15);

        let right = snap(&mut host, &SnapRequest::new("ref", "tip", 30, 30));
        assert_eq!(
            right,
            SnapOutcome::Placed {
                left: 5 + 200 - 10,
                top: 15 + 80,
                anchor: Anchor::Pointer
            }
        );

        let left = snap(&mut host, &SnapRequest::new("ref", "tip", -30, 2000));
        assert_eq!(
            left,
            SnapOutcome::Placed {
                left: 5 + 200 - 5 - 120,
                top: 15 + 80 + 2000,
                anchor: Anchor::Pointer
            }
        );
    }

    #[test]
    fn unresolved_or_unanchored_requests_write_nothing() {
        let mut host = FakeHost::with(&["ref", "tip"]);
        assert_eq!(
            snap(&mut host, &SnapRequest::new("nope", "tip", 0, 0)),
            SnapOutcome::Skipped(SkipReason::ReferenceNotFound("nope".into()))
        );
        assert_eq!(
            snap(&mut host, &SnapRequest::new("ref", "gone", 0, 0)),
            SnapOutcome::Skipped(SkipReason::TargetNotFound("gone".into()))
        );
        assert_eq!(
            snap(&mut host, &SnapRequest::new("ref", "tip", 0, 0)),
            SnapOutcome::Skipped(SkipReason::NoAnchor)
        );
        assert!(host.styles.is_empty());
    }
}
