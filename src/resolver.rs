//! Element lookup by name across the legacy DOM access paths.
//!
//! A name is tried, in order, as a named property of the document, against the
//! "all elements" index, against every form's controls, inside each nested
//! layer document, and finally as an element id. The first hit wins; a miss is
//! `None`, never an error.

use crate::document::{Document, DocumentId, ElementHandle, Frame};

pub(crate) struct Resolver<'a> {
    pub(crate) documents: &'a [Document],
    pub(crate) frames: &'a [Frame],
    pub(crate) expose_all_collection: bool,
}

impl Resolver<'_> {
    pub(crate) fn resolve(&self, name: &str, root: DocumentId) -> Option<ElementHandle> {
        let (name, root) = match name.find('?') {
            Some(at) if at > 0 && !self.frames.is_empty() => {
                let frame = self.frame_document(&name[at + 1..])?;
                (&name[..at], frame)
            }
            _ => (name, root),
        };
        if name.is_empty() {
            return None;
        }
        self.resolve_in_document(name, root)
    }

    fn frame_document(&self, key: &str) -> Option<DocumentId> {
        if let Ok(index) = key.parse::<usize>() {
            return self.frames.get(index).map(|frame| frame.document);
        }
        self.frames
            .iter()
            .find(|frame| frame.name == key)
            .map(|frame| frame.document)
    }

    fn resolve_in_document(&self, name: &str, document_id: DocumentId) -> Option<ElementHandle> {
        let document = self.documents.get(document_id.0)?;
        let dom = &document.dom;
        let found = dom
            .named_property(name)
            .or_else(|| {
                self.expose_all_collection
                    .then(|| dom.all_item(name))
                    .flatten()
            })
            .or_else(|| {
                dom.forms()
                    .into_iter()
                    .find_map(|form| dom.form_field(form, name))
            });
        if let Some(node) = found {
            return Some(ElementHandle::new(document_id, node));
        }

        if let Some(handle) = document
            .layers
            .iter()
            .find_map(|layer| self.resolve_in_document(name, *layer))
        {
            return Some(handle);
        }

        dom.by_id(name)
            .map(|node| ElementHandle::new(document_id, node))
    }
}
