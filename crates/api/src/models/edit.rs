use super::symbol::Range;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// A batch of edits that must be applied together or not at all.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceEdit {
    pub changes: BTreeMap<Url, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edit unless one already starts at the same position in that document.
    pub fn add_edit(&mut self, uri: Url, edit: TextEdit) -> bool {
        let edits = self.changes.entry(uri).or_default();
        let start = edit.range.start();
        if edits.iter().any(|e| e.range.start() == start) {
            return false;
        }
        edits.push(edit);
        true
    }

    /// Orders each document's edits by position.
    pub fn normalize(&mut self) {
        for edits in self.changes.values_mut() {
            edits.sort_by_key(|e| (e.range.start(), e.range.end()));
        }
        self.changes.retain(|_, edits| !edits.is_empty());
    }

    pub fn edits_for(&self, uri: &Url) -> &[TextEdit] {
        self.changes.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edit_count(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}
