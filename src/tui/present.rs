//! Display derivation for refinement results
//!
//! Pure mapping from a successful [`RefineResult`] to what the output
//! panes actually show. Kept out of the render path so the omission
//! rules are testable without a terminal.

use crate::api::RefineResult;

/// What the output section displays for a successful refinement
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    /// Shown verbatim, always present
    pub refined_prompt: String,
    /// "What Was Improved" narrative; omitted when empty
    pub improvements: Option<String>,
    /// "Automatic Analysis" section; omitted when the service sent none
    pub analysis: Option<AnalysisView>,
}

/// Labeled analysis fields plus the added-details list
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub intent: String,
    pub domain: String,
    pub role: String,
    pub output_format: String,
    /// "Added Details" bullets; the section is omitted when empty
    pub added_details: Vec<String>,
}

impl AnalysisView {
    /// Field label/value pairs in display order
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Intent", self.intent.as_str()),
            ("Domain", self.domain.as_str()),
            ("Role", self.role.as_str()),
            ("Output Format", self.output_format.as_str()),
        ]
    }
}

/// Derive the display model from a refinement result
pub fn present(result: &RefineResult) -> DisplayModel {
    let improvements = if result.improvements.trim().is_empty() {
        None
    } else {
        Some(result.improvements.clone())
    };

    let analysis = result.analysis.as_ref().map(|a| AnalysisView {
        intent: a.intent.clone(),
        domain: a.domain.clone(),
        role: a.role.clone(),
        output_format: a.output_format.clone(),
        added_details: a.missing_details.clone(),
    });

    DisplayModel {
        refined_prompt: result.refined_prompt.clone(),
        improvements,
        analysis,
    }
}
