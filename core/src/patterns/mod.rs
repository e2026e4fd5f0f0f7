//! Pattern Library: named boolean predicates over text labels
//!
//! A label is anything implementing [`LabelLike`]: a string, a list of
//! strings (matched disjunctively), an optional value, or a JSON value. A
//! predicate is a [`PatternSet`] of regex rules; it is true when any rule
//! matches. Values that are neither strings nor lists never match.
//!
//! Predicates are generated with the `predicate!` macro and looked up by
//! name through [`Predicate`].

#[macro_use]
mod macros;
pub mod anatomy;
pub mod common;
pub mod mr;
pub mod ophtha;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// Text source a predicate can be evaluated against
pub trait LabelLike {
    /// Whether `test` holds for any string carried by this label
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool;
}

impl LabelLike for str {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        test(self)
    }
}

impl LabelLike for String {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        test(self)
    }
}

impl<T: LabelLike + ?Sized> LabelLike for &T {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        (**self).any_text(test)
    }
}

impl<T: LabelLike> LabelLike for Option<T> {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        self.as_ref().is_some_and(|label| label.any_text(test))
    }
}

impl<T: LabelLike> LabelLike for [T] {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        self.iter().any(|label| label.any_text(test))
    }
}

impl<T: LabelLike> LabelLike for Vec<T> {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        self.as_slice().any_text(test)
    }
}

impl LabelLike for Value {
    fn any_text(&self, test: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Value::String(s) => test(s),
            Value::Array(items) => items.any_text(test),
            _ => false,
        }
    }
}

/// Declarative form of a single rule
#[derive(Debug, Clone, Copy)]
pub enum RuleSpec {
    /// Case-insensitive regex search
    Any(&'static str),
    /// Case-sensitive regex search
    Exact(&'static str),
    /// Every case-insensitive regex must be found, in any order
    All(&'static [&'static str]),
}

pub const fn any(pattern: &'static str) -> RuleSpec {
    RuleSpec::Any(pattern)
}

pub const fn exact(pattern: &'static str) -> RuleSpec {
    RuleSpec::Exact(pattern)
}

pub const fn all(patterns: &'static [&'static str]) -> RuleSpec {
    RuleSpec::All(patterns)
}

/// A compiled rule
#[derive(Debug, Clone)]
pub enum Rule {
    Search(Regex),
    AllOf(Vec<Regex>),
}

impl Rule {
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Rule::Search(re) => re.is_match(text),
            Rule::AllOf(regexes) => regexes.iter().all(|re| re.is_match(text)),
        }
    }
}

fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
}

/// Ordered set of rules backing one predicate
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    /// Compiles a set of rules
    ///
    /// # Errors
    ///
    /// Returns the regex error of the first invalid pattern
    pub fn try_compile(specs: &[RuleSpec]) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            let rule = match spec {
                RuleSpec::Any(p) => Rule::Search(build_regex(p, true)?),
                RuleSpec::Exact(p) => Rule::Search(build_regex(p, false)?),
                RuleSpec::All(ps) => Rule::AllOf(
                    ps.iter()
                        .map(|p| build_regex(p, true))
                        .collect::<Result<_, _>>()?,
                ),
            };
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    /// Compiles built-in rules; panics on an invalid pattern
    pub fn compile(specs: &[RuleSpec]) -> Self {
        Self::try_compile(specs).expect("Failed to compile regex")
    }

    /// Whether any rule matches `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }

    /// Whether any rule matches any text carried by `label`
    pub fn matches<L: LabelLike + ?Sized>(&self, label: &L) -> bool {
        label.any_text(&|text| self.is_match(text))
    }
}

macro_rules! registry {
    ($($variant:ident => $name:literal, $func:path;)*) => {
        /// Named predicate of the Pattern Library
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Predicate {
            $($variant,)*
        }

        impl Predicate {
            /// Every predicate, in registry order
            pub const ALL: &'static [Predicate] = &[$(Predicate::$variant,)*];

            /// Registry name
            pub fn name(&self) -> &'static str {
                match self {
                    $(Predicate::$variant => $name,)*
                }
            }

            /// Looks a predicate up by registry name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Predicate::$variant),)*
                    _ => None,
                }
            }

            /// Evaluates the predicate against a label
            pub fn matches<L: LabelLike + ?Sized>(&self, label: &L) -> bool {
                match self {
                    $(Predicate::$variant => $func(label),)*
                }
            }
        }
    };
}

registry! {
    Localizer => "localizer", common::is_localizer;
    Standard => "standard_scan", common::is_standard_scan;
    AttenuationCorrected => "attenuation_corrected_scan", common::is_attn_corr_scan;
    Axial => "axial", common::is_axial;
    Coronal => "coronal", common::is_coronal;
    Sagittal => "sagittal", common::is_sagittal;
    BoneWindow => "bone_window", common::is_bone_window;
    LungWindow => "lung_window", common::is_lung_window;
    Unenhanced => "unenhanced", common::is_unenhanced;
    Enhanced => "enhanced", common::is_enhanced;
    Arterial => "arterial", common::is_arterial;
    PortalVenous => "portal_venous", common::is_portal_venous;
    DelayedEquilibrium => "delayed_equilibrium", common::is_delayed_equil;
    Cap => "cap", anatomy::is_cap_label;
    Ncap => "ncap", anatomy::is_ncap_label;
    Hcap => "hcap", anatomy::is_hcap_label;
    HeadNeck => "hn", anatomy::is_hn_label;
    NeckLower => "neck_lower", anatomy::is_neck_lower_label;
    NeckUpper => "neck_upper", anatomy::is_neck_upper_label;
    To => "to", anatomy::is_to;
    Head => "head", anatomy::is_head_label;
    Neck => "neck", anatomy::is_neck_label;
    Chest => "chest", anatomy::is_chest_label;
    Abdomen => "abdomen", anatomy::is_abdomen_label;
    Pelvis => "pelvis", anatomy::is_pelvis_label;
    LowerExtremities => "lower_extremities", anatomy::is_lower_extremities;
    UpperExtremities => "upper_extremities", anatomy::is_upper_extremities;
    WholeBody => "whole_body", anatomy::is_whole_body_label;
    T1 => "t1", mr::is_anatomy_t1;
    T2 => "t2", mr::is_anatomy_t2;
    InPlane => "inplane", mr::is_anatomy_inplane;
    MrAnatomy => "mr_anatomy", mr::is_anatomy;
    Diffusion => "diffusion", mr::is_diffusion;
    DiffusionDerived => "diffusion_derived", mr::is_diffusion_derived;
    Functional => "functional", mr::is_functional;
    FunctionalDerived => "functional_derived", mr::is_functional_derived;
    Shim => "shim", mr::is_shim;
    Fieldmap => "fieldmap", mr::is_fieldmap;
    Calibration => "calibration", mr::is_calibration;
    CoilSurvey => "coil_survey", mr::is_coil_survey;
    Perfusion => "perfusion", mr::is_perfusion;
    ProtonDensity => "proton_density", mr::is_proton_density;
    PhaseMap => "phase_map", mr::is_phase_map;
    Screenshot => "screenshot", mr::is_screenshot;
    Spectroscopy => "spectroscopy", mr::is_spectroscopy;
    Post => "post", mr::is_post;
    Swi => "swi", mr::is_swi;
    Left => "left", ophtha::is_left;
    Right => "right", ophtha::is_right;
    Oct => "oct", ophtha::is_oct;
    OctOp => "oct_op", ophtha::is_oct_op;
    OctOpt => "oct_opt", ophtha::is_oct_opt;
}

/// Evaluates a predicate by registry name
///
/// Unknown names never match.
pub fn matches<L: LabelLike + ?Sized>(name: &str, label: &L) -> bool {
    Predicate::from_name(name).is_some_and(|predicate| predicate.matches(label))
}
