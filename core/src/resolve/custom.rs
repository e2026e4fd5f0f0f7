//! Custom Override Resolver
//!
//! User-supplied rules mapping a label pattern to a `Key:Value[,...]`
//! classification string. A key wrapped in slashes (`/T1.*post/`) is a
//! case-insensitive regex search; any other key is a case-insensitive shell
//! glob over the whole label.

use crate::error::{Result, ScancatError};
use crate::types::classification::CUSTOM;
use crate::types::Classification;
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, error, info, warn};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Glob(GlobMatcher),
    /// Key that is not a valid glob; compared literally
    Literal(String),
}

impl Matcher {
    fn is_match(&self, label: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(label),
            Matcher::Glob(glob) => glob.is_match(label.to_lowercase()),
            Matcher::Literal(key) => *key == label.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
struct CustomRule {
    key: String,
    matcher: Matcher,
    value: String,
}

impl CustomRule {
    fn compile(key: &str, value: &str) -> Option<Self> {
        let matcher = if key.len() > 2 && key.starts_with('/') && key.ends_with('/') {
            let source = &key[1..key.len() - 1];
            match RegexBuilder::new(source).case_insensitive(true).build() {
                Ok(re) => Matcher::Regex(re),
                Err(e) => {
                    error!("Invalid custom classification regex '{}': {}", key, e);
                    return None;
                }
            }
        } else {
            let pattern = key.to_lowercase();
            match GlobBuilder::new(&pattern)
                .literal_separator(false)
                .backslash_escape(false)
                .build()
            {
                Ok(glob) => Matcher::Glob(glob.compile_matcher()),
                Err(e) => {
                    debug!("'{}' is not a glob ({}); matching literally", key, e);
                    Matcher::Literal(pattern)
                }
            }
        };
        Some(Self {
            key: key.to_string(),
            matcher,
            value: value.to_string(),
        })
    }
}

/// Ordered custom classification rules; the first matching rule wins
#[derive(Debug, Clone, Default)]
pub struct CustomClassifications {
    rules: Vec<CustomRule>,
}

impl CustomClassifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds rules from a configuration document
    ///
    /// Accepts the gear layout `{"inputs": {"classifications": {"value": {...}}}}`
    /// or a bare `{pattern: "Key:Value"}` object.
    pub fn from_value(config: &Value) -> Result<Self> {
        let Value::Object(root) = config else {
            return Err(ScancatError::Config(
                "Custom classification config must be a JSON object".to_string(),
            ));
        };

        let rules = match root.get("inputs") {
            Some(inputs) => match inputs.pointer("/classifications/value") {
                Some(Value::Object(rules)) => rules.clone(),
                Some(other) => {
                    warn!(
                        "Custom classifications value is not an object ({}); ignoring",
                        other
                    );
                    Map::new()
                }
                None => Map::new(),
            },
            None => root.clone(),
        };

        Ok(Self::from_map(&rules))
    }

    /// Builds rules from `pattern -> classification string` pairs, keeping
    /// map order
    pub fn from_map(rules: &Map<String, Value>) -> Self {
        let rules = rules
            .iter()
            .filter_map(|(key, value)| match value {
                Value::String(value) => CustomRule::compile(key, value),
                other => {
                    warn!(
                        "Custom classification for '{}' is not a string ({}); skipping",
                        key, other
                    );
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Reads rules from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Value = serde_json::from_str(&contents)?;
        let custom = Self::from_value(&config)?;
        info!(
            "Loaded {} custom classification rule(s) from {}",
            custom.len(),
            path.display()
        );
        Ok(custom)
    }

    /// Reads rules from a JSON file, returning `None` if the file is missing
    /// or unusable
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("No custom classification config at {}", path.display());
            return None;
        }
        match Self::load(path) {
            Ok(custom) => Some(custom),
            Err(e) => {
                error!(
                    "Unable to load custom classifications from {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classification of the first rule matching `label`
    pub fn classify(&self, label: &str) -> Option<Classification> {
        let rule = self.rules.iter().find(|rule| rule.matcher.is_match(label))?;
        info!("Custom classification '{}' matched '{}'", rule.key, label);
        Some(parse_classification_string(&rule.value))
    }
}

/// Parses `Key:Value[,Value][,Key:Value...]`
///
/// A segment without a `Key:` part goes under the last key seen, or under
/// `Custom` if there is none yet. Empty segments are dropped and a value
/// already listed under its key is not repeated.
pub fn parse_classification_string(value: &str) -> Classification {
    static COMMA: OnceLock<Regex> = OnceLock::new();
    static COLON: OnceLock<Regex> = OnceLock::new();
    let comma = COMMA.get_or_init(|| Regex::new(r"\s*,\s*").expect("Failed to compile regex"));
    let colon = COLON.get_or_init(|| Regex::new(r"\s*:\s*").expect("Failed to compile regex"));

    let mut classification = Classification::new();
    let mut last_key: Option<String> = None;

    for part in comma.split(value.trim()) {
        if part.is_empty() {
            continue;
        }
        let pieces: Vec<&str> = colon.split(part).collect();
        if let [key, tag] = pieces.as_slice() {
            last_key = Some(key.to_string());
            classification.push_unique(key, *tag);
            continue;
        }
        let key = match &last_key {
            Some(key) => key.clone(),
            None => {
                warn!(
                    "Unknown classification format: {}. Expected 'Key:Value', using '{}'",
                    part, CUSTOM
                );
                CUSTOM.to_string()
            }
        };
        classification.push_unique(&key, part);
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn gear_config(rules: Value) -> Value {
        json!({"inputs": {"classifications": {"value": rules}}})
    }

    #[test]
    fn test_parse_classification_string() {
        let c = parse_classification_string("Intent:Structural, Measurement : T1,T2");
        assert_eq!(c.tags("Intent"), ["Structural"]);
        assert_eq!(c.tags("Measurement"), ["T1", "T2"]);
    }

    #[test]
    fn test_parse_without_key_uses_custom() {
        let c = parse_classification_string("Contrast,Features:FLAIR");
        assert_eq!(c.tags(CUSTOM), ["Contrast"]);
        assert_eq!(c.tags("Features"), ["FLAIR"]);
    }

    #[test]
    fn test_parse_drops_empty_and_repeated_values() {
        let c = parse_classification_string("Intent:Structural,,Intent:Structural, ,T1");
        assert_eq!(c.tags("Intent"), ["Structural", "T1"]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_parse_extra_colons_go_under_last_key() {
        let c = parse_classification_string("Intent:Structural,a:b:c");
        assert_eq!(c.tags("Intent"), ["Structural", "a:b:c"]);
    }

    #[test]
    fn test_glob_rule() {
        let custom = CustomClassifications::from_value(&gear_config(json!({
            "*MPRAGE*": "Intent:Structural,Measurement:T1"
        })))
        .unwrap();
        let c = custom.classify("sag_mprage_1mm").unwrap();
        assert_eq!(c.tags("Intent"), ["Structural"]);
        assert_eq!(c.tags("Measurement"), ["T1"]);
        assert!(custom.classify("T2 FLAIR").is_none());
    }

    #[test]
    fn test_glob_matches_whole_label() {
        let custom = CustomClassifications::from_map(
            json!({"t1?post": "Custom:Contrast"}).as_object().unwrap(),
        );
        assert!(custom.classify("T1_POST").is_some());
        assert!(custom.classify("ax T1_POST").is_none());
        assert!(custom.classify("dir/T1_post").is_none());
    }

    #[test]
    fn test_regex_rule() {
        let custom = CustomClassifications::from_map(
            json!({"/^ax.*post$/": "Custom:Contrast"}).as_object().unwrap(),
        );
        assert_eq!(custom.classify("AX T1 POST").unwrap().tags(CUSTOM), ["Contrast"]);
        assert!(custom.classify("T1 POST AX").is_none());
    }

    #[test]
    fn test_first_rule_wins() {
        let custom = CustomClassifications::from_map(
            json!({
                "/flair/": "Features:FLAIR",
                "*": "Intent:Non-Image"
            })
            .as_object()
            .unwrap(),
        );
        assert_eq!(custom.classify("T2_FLAIR").unwrap().tags("Features"), ["FLAIR"]);
        assert_eq!(custom.classify("other").unwrap().tags("Intent"), ["Non-Image"]);
    }

    #[test]
    fn test_invalid_rules_skipped() {
        let custom = CustomClassifications::from_map(
            json!({
                "/(unclosed/": "Intent:Shim",
                "label": 3,
                "ok": "Intent:Calibration"
            })
            .as_object()
            .unwrap(),
        );
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.classify("OK").unwrap().tags("Intent"), ["Calibration"]);
    }

    #[test]
    fn test_bare_map_and_empty_value() {
        let bare = CustomClassifications::from_value(&json!({"*": "Intent:Shim"})).unwrap();
        assert_eq!(bare.len(), 1);

        let empty = CustomClassifications::from_value(&gear_config(json!("nope"))).unwrap();
        assert!(empty.is_empty());

        let no_classifications =
            CustomClassifications::from_value(&json!({"inputs": {}})).unwrap();
        assert!(no_classifications.is_empty());

        assert!(CustomClassifications::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            gear_config(json!({"*localizer*": "Intent:Localizer"}))
        )
        .unwrap();

        let custom = CustomClassifications::load(file.path()).unwrap();
        assert_eq!(
            custom.classify("3-Plane Localizer").unwrap().tags("Intent"),
            ["Localizer"]
        );
        assert!(CustomClassifications::load_optional(file.path()).is_some());
    }

    #[test]
    fn test_load_optional_failures() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CustomClassifications::load_optional(dir.path().join("missing.json")).is_none());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(CustomClassifications::load_optional(file.path()).is_none());
        assert!(CustomClassifications::load(file.path()).is_err());
    }
}
