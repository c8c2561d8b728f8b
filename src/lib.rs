//! Deterministic DOM shim for legacy DHTML layer pages.
//!
//! Pages written for early DHTML libraries drive everything from inline event
//! attributes: `onmouseover="snapLayer('menu','tip',10,20)"`. This crate parses
//! such a page into an in-memory DOM and runs those handlers without a browser:
//! element lookup by name across the legacy access paths, layer positioning
//! against the offset-parent chain, group visibility and hover auto-hide.
//!
//! ```
//! use dhtml_layers::{Page, PointerEvent};
//!
//! # fn main() -> dhtml_layers::Result<()> {
//! let mut page = Page::from_html(
//!     "<div id='menu' onmouseover=\"showLayers(0,'tip')\"></div>\
//!      <div id='tip' style='visibility: hidden'></div>",
//! )?;
//! page.hover(None, "menu", PointerEvent::new(5, 5))?;
//! page.assert_visible("tip")?;
//! # Ok(())
//! # }
//! ```

mod auto_hide;
mod document;
mod dom;
mod events;
mod host;
mod html;
mod inline_handler;
mod options;
mod page;
mod positioner;
mod resolver;
mod trace;
mod visibility;

pub use document::{DocumentId, ElementHandle};
pub use events::PointerEvent;
pub use host::LayerHost;
pub use inline_handler::HandlerKind;
pub use options::ShimOptions;
pub use page::Page;
pub use positioner::{Anchor, SkipReason, SnapOutcome, SnapRequest};
pub use visibility::Visibility;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("handler parse error: {0}")]
    HandlerParse(String),
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("frame not found: {0}")]
    FrameNotFound(String),
    #[error("document not found: {0:?}")]
    DocumentNotFound(DocumentId),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("assertion failed for {name}: expected {expected}, actual {actual}, snippet {dom_snippet}")]
    AssertionFailed {
        name: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}
