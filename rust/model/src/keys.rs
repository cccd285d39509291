// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity types.
//!
//! Open documents are stored in a `slotmap::SlotMap` and addressed by a
//! generational [`DocumentKey`]. Elements inside a document are addressed by
//! an [`ElementId`], a plain integer that stays stable across saves.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for an open document in a session.
    pub struct DocumentKey;
}

/// Identity of an element within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl ElementId {
    /// The "no element" id, used e.g. for the linked part of a reference to
    /// an element that is not reached through a link.
    pub const INVALID: ElementId = ElementId(-1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id() {
        assert!(!ElementId::INVALID.is_valid());
        assert!(ElementId::new(0).is_valid());
        assert_eq!(ElementId::default(), ElementId::INVALID);
    }

    #[test]
    fn display_and_serde() {
        let id = ElementId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: ElementId = serde_json::from_str("-1").unwrap();
        assert_eq!(back, ElementId::INVALID);
    }
}
