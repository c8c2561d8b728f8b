use crate::document::{DocumentId, ElementHandle};
use crate::events::PointerEvent;

/// The DOM surface the layer operations run against.
///
/// The four core operations are name resolution, absolute position, style
/// position writes and pointer-leave watching; the remaining methods expose the
/// inline style, scroll and pointer state those operations read. [`Page`]
/// implements it over the standards DOM model.
///
/// [`Page`]: crate::Page
pub trait LayerHost {
    /// Resolves `name` (optionally `name?frame`) from the document in scope.
    fn resolve(&self, name: &str) -> Option<ElementHandle>;

    /// Sum of the offsets along the offset-parent chain plus the element's own
    /// offset within its parent.
    fn absolute_position(&self, element: ElementHandle) -> (i64, i64);

    fn set_style_position(&mut self, element: ElementHandle, left: i64, top: i64);

    /// Marks `element` auto-hide enabled. Returns `false` if it already was.
    fn watch_pointer_leave(&mut self, element: ElementHandle) -> bool;

    fn style_value(&self, element: ElementHandle, property: &str) -> Option<String>;

    fn set_style_value(&mut self, element: ElementHandle, property: &str, value: &str);

    fn scroll_offset(&self, document: DocumentId) -> (i64, i64);

    /// The most recent pointer event, if any.
    fn pointer(&self) -> Option<PointerEvent>;
}
