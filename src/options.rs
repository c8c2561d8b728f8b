use std::collections::HashMap;

use crate::inline_handler::HandlerKind;
use crate::{Error, Result};

const DEFAULT_ALIASES: &[(&str, HandlerKind)] = &[
    ("showLayers", HandlerKind::ShowLayers),
    ("P7_autoLayers", HandlerKind::ShowLayers),
    ("snapLayer", HandlerKind::Snap),
    ("P7_Snap", HandlerKind::Snap),
    ("autoHide", HandlerKind::AutoHide),
    ("P7_autoHide", HandlerKind::AutoHide),
    ("showHideLayers", HandlerKind::ShowHideLayers),
    ("MM_showHideLayers", HandlerKind::ShowHideLayers),
];

/// Page-wide settings. Construct with `ShimOptions::default()` and adjust with
/// the builder methods.
#[derive(Debug, Clone)]
pub struct ShimOptions {
    pub(crate) length_unit: String,
    pub(crate) expose_all_collection: bool,
    pub(crate) aliases: HashMap<String, HandlerKind>,
    pub(crate) trace_log_limit: usize,
}

impl Default for ShimOptions {
    fn default() -> Self {
        Self {
            length_unit: "px".to_string(),
            expose_all_collection: true,
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
            trace_log_limit: 10_000,
        }
    }
}

impl ShimOptions {
    /// Unit appended to written `left`/`top` values. Empty writes bare numbers.
    pub fn length_unit(mut self, unit: &str) -> Self {
        self.length_unit = unit.to_string();
        self
    }

    pub fn expose_all_collection(mut self, enabled: bool) -> Self {
        self.expose_all_collection = enabled;
        self
    }

    /// Maps an inline handler function name onto a shim operation.
    pub fn with_alias(mut self, name: &str, kind: HandlerKind) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidOption(
                "handler alias requires a non-empty name".into(),
            ));
        }
        self.aliases.insert(name.to_string(), kind);
        Ok(self)
    }

    pub fn without_alias(mut self, name: &str) -> Self {
        self.aliases.remove(name);
        self
    }

    pub fn trace_log_limit(mut self, max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(Error::InvalidOption(
                "trace log limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        Ok(self)
    }

    pub(crate) fn handler_kind(&self, name: &str) -> Option<HandlerKind> {
        self.aliases.get(name).copied()
    }
}
