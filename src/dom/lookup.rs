use super::{Dom, NodeId};

// Elements exposed as named properties of the document object.
const NAMED_PROPERTY_TAGS: &[&str] = &["form", "img", "embed", "object", "iframe"];
const NAMED_BY_ID_TAGS: &[&str] = &["img", "object"];

// Listed form-associated elements, the members of `form.elements`.
const LISTED_FORM_TAGS: &[&str] = &[
    "input", "select", "textarea", "button", "fieldset", "object", "output",
];

impl Dom {
    /// `document[name]`: named form, image, embed, object or iframe.
    pub(crate) fn named_property(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root).into_iter().find(|node| {
            let Some(tag) = self.tag_name(*node) else {
                return false;
            };
            let tag = tag.to_ascii_lowercase();
            (NAMED_PROPERTY_TAGS.contains(&tag.as_str()) && self.attr(*node, "name") == Some(name))
                || (NAMED_BY_ID_TAGS.contains(&tag.as_str()) && self.attr(*node, "id") == Some(name))
        })
    }

    /// `document.all[name]`: any element whose id or name matches.
    pub(crate) fn all_item(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root).into_iter().find(|node| {
            self.attr(*node, "id") == Some(name) || self.attr(*node, "name") == Some(name)
        })
    }

    pub(crate) fn forms(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| self.has_tag(*node, "form"))
            .collect()
    }

    /// `form[name]` over the form's listed controls.
    pub(crate) fn form_field(&self, form: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(form).into_iter().find(|node| {
            let listed = self
                .tag_name(*node)
                .is_some_and(|tag| LISTED_FORM_TAGS.contains(&tag.to_ascii_lowercase().as_str()));
            listed && (self.attr(*node, "name") == Some(name) || self.attr(*node, "id") == Some(name))
        })
    }
}
