/// Declares a label predicate backed by a lazily compiled [`PatternSet`]
///
/// ```ignore
/// predicate! {
///     /// Anatomy, Head
///     pub fn is_head_label => [any("head"), any("brain")]
/// }
/// ```
///
/// [`PatternSet`]: crate::patterns::PatternSet
macro_rules! predicate {
    ($($(#[$meta:meta])* $vis:vis fn $name:ident => [$($rule:expr),* $(,)?])*) => {
        $(
            $(#[$meta])*
            $vis fn $name<L: $crate::patterns::LabelLike + ?Sized>(label: &L) -> bool {
                static PATTERNS: std::sync::OnceLock<$crate::patterns::PatternSet> =
                    std::sync::OnceLock::new();
                PATTERNS
                    .get_or_init(|| $crate::patterns::PatternSet::compile(&[$($rule),*]))
                    .matches(label)
            }
        )*
    };
}
