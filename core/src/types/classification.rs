use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// Category names of the controlled vocabulary
pub const SCAN_TYPE: &str = "Scan Type";
pub const ANATOMY: &str = "Anatomy";
pub const CONTRAST: &str = "Contrast";
pub const ISOTOPE: &str = "Isotope";
pub const TRACER: &str = "Tracer";
pub const PROCESSING: &str = "Processing";
pub const LATERALITY: &str = "Laterality";
pub const OCT_TYPE: &str = "OCT Type";
pub const INTENT: &str = "Intent";
pub const MEASUREMENT: &str = "Measurement";
pub const FEATURES: &str = "Features";
pub const CUSTOM: &str = "Custom";

pub const LOCALIZER: &str = "Localizer";

/// Classification output: category name to a list of tags
///
/// Setting a category replaces it (last write wins); pushing appends a tag
/// only if it is not already present, so accumulated lists behave as sets
/// while keeping first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification {
    tags: BTreeMap<String, Vec<String>>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification short-circuited as a localizer
    pub fn localizer() -> Self {
        let mut classification = Self::new();
        classification.set(SCAN_TYPE, [LOCALIZER]);
        classification
    }

    /// Whether `Scan Type` is exactly `["Localizer"]`
    pub fn is_localizer(&self) -> bool {
        self.tags(SCAN_TYPE) == [LOCALIZER]
    }

    /// True when no category is present
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Returns the tags of a category (empty when absent)
    pub fn tags(&self, key: &str) -> &[String] {
        self.tags.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the tags of a category, `None` when absent
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.tags.get(key).map(Vec::as_slice)
    }

    /// First tag of a category
    pub fn first(&self, key: &str) -> Option<&str> {
        self.tags(key).first().map(String::as_str)
    }

    /// Whether `value` is one of the tags of `key`
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.tags(key).iter().any(|v| v == value)
    }

    /// Replaces a category with the given tags (deduplicated)
    pub fn set<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !tags.contains(&value) {
                tags.push(value);
            }
        }
        self.tags.insert(key.to_string(), tags);
    }

    /// Appends a tag if not already present, creating the category if needed
    ///
    /// Returns `true` if the tag was added.
    pub fn push_unique(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let tags = self.tags.entry(key.to_string()).or_default();
        if tags.contains(&value) {
            false
        } else {
            tags.push(value);
            true
        }
    }

    /// Appends every tag not already present
    pub fn extend_unique<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push_unique(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(key, values)| format!("{}: [{}]", key, values.join(", ")))
            .collect();
        write!(f, "{{{}}}", parts.join("; "))
    }
}
