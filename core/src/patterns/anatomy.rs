//! Anatomy predicates: aggregate abbreviations, combinations and direct
//! body-region tokens

use super::any;

predicate! {
    // Aggregate anatomy
    pub fn is_cap_label => [any("c.?a.?p")]
    pub fn is_ncap_label => [any("n.?c.?a.?p")]
    pub fn is_hcap_label => [any("h.?c.?a.?p")]

    // Combination anatomy
    pub fn is_hn_label => [any("(^|[^a-zA-Z])hn([^a-zA-Z]|$)")]
    pub fn is_neck_lower_label => [any(r"Neck w\^IV lower"), any("Neck lower"), any("neck.?lower")]
    pub fn is_neck_upper_label => [any(r"Neck w\^IV upper"), any("Neck upper"), any("neck.?upper")]

    /// Standalone `to`, the marker of a ranged anatomy label
    pub fn is_to => [any("(^|[^a-zA-Z])to([^a-zA-Z]|$)")]

    pub fn is_head_label => [any("head"), any("brain")]
    pub fn is_neck_label => [any("neck"), any("cervical"), any("hals")]
    pub fn is_chest_label => [
        any("chest"),
        any("lung"),
        any("thorax"),
        any("thoracic"),
        any("thoracicspine"),
    ]
    pub fn is_abdomen_label => [
        any("abdomen"),
        any("abdomenl"),
        any("bdomen"),
        any("abd"),
        any("abdo"),
        any("lumbarspine"),
    ]
    pub fn is_pelvis_label => [any("pel"), any("(^|[^a-zA-Z])pv([^a-zA-Z]|$)")]
    pub fn is_lower_extremities => [
        any("(^|[^a-zA-Z])le([^a-zA-Z]|$)"),
        any("lower.?extremity"),
        any("lower.?extremities"),
    ]
    pub fn is_upper_extremities => [
        any("(^|[^a-zA-Z])ue([^a-zA-Z]|$)"),
        any("upper.?extremity"),
        any("upper.?extremities"),
    ]
    pub fn is_whole_body_label => [
        any("whole"),
        any("(^|[^a-zA-Z])wb([^a-zA-Z]|$)"),
        any("body"),
        any("eyes.?to.?thighs"),
        any("eye.?to.?thigh"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CAP", true, false, false)]
    #[case("C/A/P", true, false, false)]
    #[case("NCAP", true, true, false)]
    #[case("HCAP", true, false, true)]
    #[case("chest", false, false, false)]
    fn test_aggregate(
        #[case] label: &str,
        #[case] cap: bool,
        #[case] ncap: bool,
        #[case] hcap: bool,
    ) {
        assert_eq!(is_cap_label(label), cap);
        assert_eq!(is_ncap_label(label), ncap);
        assert_eq!(is_hcap_label(label), hcap);
    }

    #[test]
    fn test_standalone_tokens() {
        assert!(is_hn_label("HN"));
        assert!(is_hn_label("CT_HN w/"));
        assert!(!is_hn_label("JOHN"));
        assert!(is_pelvis_label("ABD PV"));
        assert!(is_lower_extremities("LE Runoff"));
        assert!(!is_lower_extremities("Pelvis"));
        assert!(is_upper_extremities("UE"));
        assert!(is_whole_body_label("WB"));
        assert!(is_whole_body_label("Eyes to Thighs"));
    }

    #[test]
    fn test_neck_combinations() {
        assert!(is_neck_lower_label("Neck w^IV lower"));
        assert!(is_neck_lower_label("NECK_LOWER"));
        assert!(is_neck_upper_label("neck upper"));
        assert!(!is_neck_upper_label("neck lower"));
    }

    #[test]
    fn test_to() {
        assert!(is_to("Head to Pelvis"));
        assert!(is_to("head_to_thighs"));
        assert!(!is_to("Tomography"));
        assert!(!is_to("Protocol"));
    }

    #[test]
    fn test_direct_tokens() {
        assert!(is_head_label("BRAIN"));
        assert!(is_neck_label("C-Spine Cervical"));
        assert!(is_chest_label("Thorax"));
        assert!(is_abdomen_label("ABD"));
        assert!(is_abdomen_label("LumbarSpine"));
        assert!(is_pelvis_label("Pelvis"));
    }
}
