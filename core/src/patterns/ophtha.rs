//! Ophthalmology predicates: laterality and OCT variants

use super::any;

predicate! {
    /// Left eye: a standalone L, LE or OS, or the word LEFT
    pub fn is_left => [any("(^|[^a-zA-Z])(L|LE|OS)([^a-zA-Z]|$)"), any("LEFT")]
    /// Right eye: a standalone R, RE or OD, or the word RIGHT
    pub fn is_right => [any("(^|[^a-zA-Z])(R|RE|OD)([^a-zA-Z]|$)"), any("RIGHT")]
    pub fn is_oct => [any("OCT")]
    /// Spectral-domain OCT ending in OP but not OPT (fundus)
    pub fn is_oct_op => [any("SD.*OCT.*OP(?:[^T]|$)")]
    pub fn is_oct_opt => [any("SD.*OCT.*OPT")]
}
