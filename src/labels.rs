//src/labels.rs

use indexmap::IndexMap;

use crate::types::Label;

/// Filename -> class label, in the order files were first seen.
#[derive(Debug, Clone)]
pub struct LabelAssigner {
    labels: IndexMap<String, Label>,
    next: Label,
}

impl Default for LabelAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelAssigner {
    pub fn new() -> Self {
        Self {
            labels: IndexMap::new(),
            next: Label::FIRST,
        }
    }

    /// Label for `filename`, allocating the next one on first sight.
    pub fn assign(&mut self, filename: &str) -> Label {
        if let Some(&label) = self.labels.get(filename) {
            return label;
        }
        let label = self.next;
        self.next = label.next();
        self.labels.insert(filename.to_string(), label);
        label
    }

    pub fn get(&self, filename: &str) -> Option<Label> {
        self.labels.get(filename).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(filename, label)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> + '_ {
        self.labels.iter().map(|(name, &label)| (name.as_str(), label))
    }
}
