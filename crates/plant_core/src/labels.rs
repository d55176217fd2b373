//! Class names, positionally aligned with the model output vector.

use crate::error::{ClassifierError, Result};
use std::fs;
use std::path::Path;

/// Class names the bundled model was trained on, in output order. The order
/// comes from the trained model's own class list and must not be re-sorted.
pub const PLANT_LABELS: [&str; 30] = [
    "aloevera",
    "banana",
    "bilimbi",
    "cantaloupe",
    "cassava",
    "coconut",
    "corn",
    "cucumber",
    "curcuma",
    "eggplant",
    "galangal",
    "ginger",
    "guava",
    "kale",
    "longbeans",
    "mango",
    "melon",
    "orange",
    "paddy",
    "papaya",
    "peper chili",
    "pineapple",
    "pomelo",
    "shallot",
    "soybeans",
    "spinach",
    "sweet potatoes",
    "tobacco",
    "waterapple",
    "watermelon",
];

/// Ordered label list used to name a predicted class index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabelTable {
    pub fn builtin() -> Self {
        Self {
            names: PLANT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads one label per line. Surrounding whitespace and blank lines are ignored.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let names: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(ClassifierError::Labels(format!(
                "{} contains no labels",
                path.display()
            )));
        }
        tracing::info!("loaded {} labels from {}", names.len(), path.display());
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name for `index`, or `class_<index>` when the model emits more classes
    /// than the table knows about.
    pub fn name(&self, index: usize) -> String {
        self.names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("class_{index}"))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
