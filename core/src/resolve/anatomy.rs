//! Anatomy Resolver
//!
//! Combines aggregate, combination, multiple-occurrence and direct anatomy
//! rules over a label, and expands ranged labels ("Head to Pelvis") over
//! [`SEQUENCE_ANATOMY`].

use super::coverage::anatomy_from_scan_coverage;
use crate::error::{Result, ScancatError};
use crate::patterns::anatomy::*;
use crate::patterns::common::is_lung_window;
use crate::types::{Anatomy, SEQUENCE_ANATOMY};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use Anatomy::*;

/// Result of a ranged anatomy label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangedAnatomy {
    /// First and last anatomy are the same; not a true range
    Single(Anatomy),
    /// Inclusive span of the sequence
    Span(Vec<Anatomy>),
}

impl RangedAnatomy {
    pub fn into_vec(self) -> Vec<Anatomy> {
        match self {
            RangedAnatomy::Single(anatomy) => vec![anatomy],
            RangedAnatomy::Span(anatomy) => anatomy,
        }
    }
}

/// Lowercases and splits on punctuation or whitespace runs
///
/// Adjacent delimiters yield empty tokens.
fn split_tokens(label: &str) -> Vec<String> {
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    let re = SPLIT.get_or_init(|| {
        Regex::new(r"[^a-zA-Z0-9\s]|\s+").expect("Failed to compile regex")
    });
    re.split(&label.to_lowercase()).map(str::to_string).collect()
}

/// Whether `word` appears as a token more than once
pub fn is_multiple_occurrence(label: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    split_tokens(label).iter().filter(|t| **t == word).count() > 1
}

/// Classifies every body region named in `label`
///
/// Rule groups are additive except the aggregate abbreviations, where only
/// the most inclusive of HCAP, NCAP and CAP applies. The result is
/// deduplicated and ordered by [`SEQUENCE_ANATOMY`].
pub fn classify_anatomy(label: &str) -> Vec<Anatomy> {
    let mut anatomy: BTreeSet<Anatomy> = BTreeSet::new();

    // Aggregate
    if is_hcap_label(label) {
        anatomy.extend([Head, Neck, Chest, Abdomen, Pelvis]);
    } else if is_ncap_label(label) {
        anatomy.extend([Neck, Chest, Abdomen, Pelvis]);
    } else if is_cap_label(label) {
        anatomy.extend([Chest, Abdomen, Pelvis]);
    }

    // Combination
    let neck_lower = is_neck_lower_label(label);
    let neck_upper = is_neck_upper_label(label);
    if is_hn_label(label) {
        anatomy.extend([Head, Neck]);
    }
    if neck_lower {
        anatomy.insert(Chest);
    }
    if neck_upper {
        anatomy.insert(Head);
    }

    // Multiple occurrences
    if is_multiple_occurrence(label, "neck") {
        match (neck_lower, neck_upper) {
            (true, true) => anatomy.extend([Head, Chest]),
            (true, false) => anatomy.extend([Neck, Chest]),
            (false, true) => anatomy.extend([Head, Neck]),
            (false, false) => {}
        }
    }
    if is_multiple_occurrence(label, "lung") {
        anatomy.insert(Chest);
    }

    // Direct
    if is_head_label(label) {
        anatomy.insert(Head);
    }
    if is_neck_label(label) && !neck_lower && !neck_upper {
        anatomy.insert(Neck);
    }
    if is_chest_label(label) && !is_lung_window(label) {
        anatomy.insert(Chest);
    }
    if is_abdomen_label(label) {
        anatomy.insert(Abdomen);
    }
    if is_pelvis_label(label) {
        anatomy.insert(Pelvis);
    }
    if is_lower_extremities(label) {
        anatomy.insert(LowerExtremities);
    }
    if is_upper_extremities(label) {
        anatomy.insert(UpperExtremities);
    }
    if is_whole_body_label(label) {
        anatomy.insert(WholeBody);
    }

    anatomy.into_iter().collect()
}

/// Classifies one side of a range, requiring exactly one anatomy
fn single_anatomy(token: Option<&String>, side: &str) -> Option<Anatomy> {
    let Some(token) = token else {
        warn!("Could not create {} anatomy: no token on that side of 'to'", side);
        return None;
    };
    let anatomy = classify_anatomy(token);
    match anatomy.as_slice() {
        [single] => Some(*single),
        [] => {
            warn!(
                "Could not create {} anatomy from label '{}'. Got '{:?}'",
                side, token, anatomy
            );
            None
        }
        _ => {
            warn!(
                "Could not find {} anatomy '{:?}' in ranged anatomy search. Anatomy must be \
                 one of the following: {:?}",
                side, anatomy, SEQUENCE_ANATOMY
            );
            None
        }
    }
}

/// Expands a ranged anatomy label such as "Head to Pelvis"
///
/// The tokens right before and after the first `to` must each classify to
/// exactly one anatomy, otherwise `Ok(None)` is returned. A leading `to`
/// has no token before it and also yields `Ok(None)`; it never wraps around
/// to the last token of the label.
///
/// # Errors
///
/// - [`ScancatError::MissingRangeToken`] if the label has no `to` token
/// - [`ScancatError::RangedAnatomyOrder`] if the first anatomy comes after
///   the last one in [`SEQUENCE_ANATOMY`]
pub fn resolve_ranged_anatomy(label: &str) -> Result<Option<RangedAnatomy>> {
    let tokens = split_tokens(label);
    let Some(idx) = tokens.iter().position(|t| t == "to") else {
        return Err(ScancatError::MissingRangeToken(label.to_string()));
    };

    let before = idx.checked_sub(1).and_then(|i| tokens.get(i));
    let Some(first) = single_anatomy(before, "first") else {
        return Ok(None);
    };
    let Some(last) = single_anatomy(tokens.get(idx + 1), "last") else {
        return Ok(None);
    };

    let first_index = first.sequence_index();
    let last_index = last.sequence_index();

    if first_index == last_index {
        warn!(
            "This is not a ranged anatomy in the form '[first_anatomy] to [last_anatomy]'. \
             The first and last anatomies are the same. Using only the first one ('{}')",
            first
        );
        return Ok(Some(RangedAnatomy::Single(first)));
    }
    if first_index > last_index {
        return Err(ScancatError::RangedAnatomyOrder {
            first_index,
            last_index,
            first,
            last,
        });
    }

    Ok(Some(RangedAnatomy::Span(
        SEQUENCE_ANATOMY[first_index..=last_index].to_vec(),
    )))
}

/// Anatomy from a label, trying a ranged expansion first
///
/// A label without a usable range falls back to whole-label
/// classification.
///
/// # Errors
///
/// Propagates [`ScancatError::RangedAnatomyOrder`].
pub fn anatomy_from_label(label: &str) -> Result<Vec<Anatomy>> {
    if is_to(label) {
        match resolve_ranged_anatomy(label) {
            Ok(Some(ranged)) => return Ok(ranged.into_vec()),
            Ok(None) => {}
            Err(ScancatError::MissingRangeToken(_)) => {
                debug!("'to' in '{}' is not a standalone token", label);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(classify_anatomy(label))
}

/// Anatomy cascade: acquisition label, then series description, then scan
/// coverage
///
/// Never yields `None`; an unclassified series gets an empty list.
pub fn resolve_anatomy(
    acquisition_label: Option<&str>,
    series_description: Option<&str>,
    scan_coverage: Option<f64>,
) -> Result<Vec<Anatomy>> {
    info!("Attempting to get anatomy classification from acquisition label...");
    let mut anatomy = match acquisition_label {
        Some(label) => anatomy_from_label(label)?,
        None => Vec::new(),
    };

    if anatomy.is_empty() {
        info!("Could not classify. Attempting to classify from series description...");
        if let Some(description) = series_description {
            anatomy = anatomy_from_label(description)?;
        }
    }

    if anatomy.is_empty() {
        info!("Could not classify. Attempting to classify from scan coverage...");
        anatomy = anatomy_from_scan_coverage(scan_coverage);
    }

    if anatomy.is_empty() {
        info!("Could not classify. Set anatomy classification to []");
    } else {
        info!("Classified as {:?}", anatomy);
    }
    Ok(anatomy)
}
