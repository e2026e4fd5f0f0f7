use crate::classifiers::{
    classify_ct, classify_mr, classify_ophtha, classify_pt, OphthaDetails, SeriesContext,
};
use crate::error::Result;
use crate::header::Header;
use crate::resolve::CustomClassifications;
use crate::series::SeriesDocument;
use crate::types::{Classification, Info, Modality, SliceTable};
use log::info;
use serde::Serialize;

/// Main entry point for classifying an imaging series
///
/// Holds the optional custom classification rules so a batch loads them
/// once and shares them across every series.
///
/// # Example
///
/// ```
/// use scancat_core::{Header, Modality, SeriesClassifier, SliceTable};
/// use serde_json::json;
///
/// let header = Header::from_json(json!({"ImageType": ["ORIGINAL", "PRIMARY"]})).unwrap();
/// let slices = SliceTable::from_positions((0..50).map(|i| [0.0, 0.0, i as f64 * 20.0]));
///
/// let result = SeriesClassifier::new()
///     .classify(Modality::Ct, &header, &slices, Some("CHEST ABD PELVIS"))
///     .unwrap();
///
/// assert_eq!(result.classification.tags("Anatomy"), ["Chest", "Abdomen", "Pelvis"]);
/// assert_eq!(result.info.scan_coverage, Some(980.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeriesClassifier {
    custom: Option<CustomClassifications>,
}

impl SeriesClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches custom classification rules (used by MR)
    pub fn with_custom_classifications(mut self, custom: CustomClassifications) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Classifies one series
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The header `ImageType` is present but not a list (CT, PT)
    /// - A ranged anatomy label runs backwards (CT, PT)
    pub fn classify(
        &self,
        modality: Modality,
        header: &Header,
        slices: &SliceTable,
        acquisition_label: Option<&str>,
    ) -> Result<SeriesClassification> {
        let ctx = SeriesContext::new(header, slices, acquisition_label);
        info!(
            "Classifying {} series with {} slice(s), label {:?}",
            modality,
            slices.len(),
            ctx.acquisition_label
        );

        let mut ophtha = None;
        let classified = match modality {
            Modality::Ct => classify_ct(&ctx)?,
            Modality::Mr => classify_mr(&ctx, self.custom.as_ref())?,
            Modality::Pt => classify_pt(&ctx)?,
            Modality::Ophtha => {
                let (classified, details) = classify_ophtha(&ctx);
                ophtha = details;
                classified
            }
        };

        Ok(SeriesClassification {
            modality,
            classification: classified.classification,
            info: classified.info,
            ophtha,
        })
    }

    /// Classifies a series document
    ///
    /// The modality comes from `modality_override`, then the document, then
    /// the header `Modality`.
    pub fn classify_document(
        &self,
        document: &SeriesDocument,
        modality_override: Option<Modality>,
    ) -> Result<SeriesClassification> {
        let modality = match modality_override {
            Some(modality) => modality,
            None => document.modality()?,
        };
        self.classify(
            modality,
            &document.header,
            &document.slices,
            document.acquisition_label.as_deref(),
        )
    }
}

/// Output of one classification call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesClassification {
    pub modality: Modality,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Info::is_empty")]
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ophtha: Option<OphthaDetails>,
}

impl SeriesClassification {
    pub fn is_localizer(&self) -> bool {
        self.classification.is_localizer()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
