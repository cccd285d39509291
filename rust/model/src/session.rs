// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The set of open documents.

use slotmap::SlotMap;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::keys::DocumentKey;

/// Open documents, in the order they were opened, with one active document.
#[derive(Debug, Default)]
pub struct Session {
    documents: SlotMap<DocumentKey, Document>,
    order: Vec<DocumentKey>,
    active: Option<DocumentKey>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a document. The first document opened becomes active.
    pub fn open(&mut self, document: Document) -> DocumentKey {
        let key = self.documents.insert(document);
        self.order.push(key);
        if self.active.is_none() {
            self.active = Some(key);
        }
        key
    }

    pub fn set_active(&mut self, key: DocumentKey) -> Result<()> {
        if !self.documents.contains_key(key) {
            return Err(Error::DocumentNotFound);
        }
        self.active = Some(key);
        Ok(())
    }

    /// The document the user is working in.
    pub fn active(&self) -> Option<DocumentKey> {
        self.active
    }

    pub fn get(&self, key: DocumentKey) -> Option<&Document> {
        self.documents.get(key)
    }

    pub fn get_mut(&mut self, key: DocumentKey) -> Option<&mut Document> {
        self.documents.get_mut(key)
    }

    /// Document by key, or [`Error::DocumentNotFound`].
    pub fn document(&self, key: DocumentKey) -> Result<&Document> {
        self.get(key).ok_or(Error::DocumentNotFound)
    }

    pub fn document_mut(&mut self, key: DocumentKey) -> Result<&mut Document> {
        self.get_mut(key).ok_or(Error::DocumentNotFound)
    }

    /// Open documents in opening order.
    pub fn documents(&self) -> impl Iterator<Item = (DocumentKey, &Document)> {
        self.order.iter().filter_map(|&k| self.documents.get(k).map(|d| (k, d)))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// First open document whose title contains `needle`.
    pub fn find_document_by_title(&self, needle: &str) -> Option<DocumentKey> {
        self.documents()
            .find(|(_, d)| d.title().contains(needle))
            .map(|(k, _)| k)
    }

    /// Open document with exactly this title, as used to resolve links.
    pub fn find_document_by_exact_title(&self, title: &str) -> Option<DocumentKey> {
        self.documents()
            .find(|(_, d)| d.title() == title)
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_document_is_active() {
        let mut session = Session::new();
        let ar = session.open(Document::new("Project_AR"));
        let ovk = session.open(Document::new("Project_ОВК"));

        assert_eq!(session.active(), Some(ar));
        session.set_active(ovk).unwrap();
        assert_eq!(session.active(), Some(ovk));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn title_lookup() {
        let mut session = Session::new();
        session.open(Document::new("Project_AR"));
        let ovk = session.open(Document::new("Project_ОВК_R21"));

        assert_eq!(session.find_document_by_title("ОВК"), Some(ovk));
        assert_eq!(session.find_document_by_title("ВК_R"), Some(ovk));
        assert_eq!(session.find_document_by_title("KR"), None);
        assert_eq!(session.find_document_by_exact_title("ОВК"), None);
        assert_eq!(session.find_document_by_exact_title("Project_ОВК_R21"), Some(ovk));
    }

    #[test]
    fn documents_in_open_order() {
        let mut session = Session::new();
        session.open(Document::new("B"));
        session.open(Document::new("A"));
        let titles: Vec<&str> = session.documents().map(|(_, d)| d.title()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }
}
