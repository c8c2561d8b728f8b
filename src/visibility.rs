use std::collections::HashMap;

use crate::host::LayerHost;

/// CSS `visibility` value written onto a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    /// Any other CSS value, written as-is (e.g. `inherit`).
    Other(String),
}

impl Visibility {
    /// Handler token: `show` and `hide` map to `visible` and `hidden`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "show" | "visible" => Self::Visible,
            "hide" | "hidden" => Self::Hidden,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_css(&self) -> &str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Other(value) => value.as_str(),
        }
    }
}

/// Names most recently shown per group, so a new show can hide them first.
#[derive(Debug, Default, Clone)]
pub(crate) struct LayerGroupRegistry {
    groups: HashMap<usize, Vec<String>>,
}

impl LayerGroupRegistry {
    pub(crate) fn members(&self, group: usize) -> &[String] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    fn replace(&mut self, group: usize, names: Vec<String>) {
        self.groups.insert(group, names);
    }
}

/// Hides the group's previous members, then shows every resolvable name and
/// records them as the new members. Returns how many were shown.
pub(crate) fn show_layers<H: LayerHost + ?Sized>(
    host: &mut H,
    registry: &mut LayerGroupRegistry,
    group: usize,
    names: &[String],
) -> usize {
    for previous in registry.members(group).to_vec() {
        if let Some(element) = host.resolve(&previous) {
            host.set_style_value(element, "visibility", Visibility::Hidden.as_css());
        }
    }

    let mut shown = Vec::new();
    for name in names {
        let Some(element) = host.resolve(name) else {
            continue;
        };
        host.set_style_value(element, "visibility", Visibility::Visible.as_css());
        if !shown.contains(name) {
            shown.push(name.clone());
        }
    }

    let count = shown.len();
    registry.replace(group, shown);
    count
}

/// Applies each `(name, visibility)` pair; unresolvable names are skipped.
pub(crate) fn show_hide_layers<H: LayerHost + ?Sized>(
    host: &mut H,
    changes: &[(String, Visibility)],
) -> usize {
    let mut applied = 0usize;
    for (name, visibility) in changes {
        if let Some(element) = host.resolve(name) {
            host.set_style_value(element, "visibility", visibility.as_css());
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_css_values() {
        assert_eq!(Visibility::from_token("show"), Visibility::Visible);
        assert_eq!(Visibility::from_token("hide"), Visibility::Hidden);
        assert_eq!(Visibility::from_token("inherit").as_css(), "inherit");
    }

    #[test]
    fn registry_groups_are_independent_and_lazy() {
        let mut registry = LayerGroupRegistry::default();
        assert!(registry.members(3).is_empty());
        registry.replace(3, vec!["a".into()]);
        registry.replace(4, vec!["b".into()]);
        registry.replace(3, vec!["c".into()]);
        assert_eq!(registry.members(3), ["c".to_string()]);
        assert_eq!(registry.members(4), ["b".to_string()]);
    }
}
