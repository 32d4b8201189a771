//! Wire types for the refinement service

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verbosity target for refinement
///
/// Closed set - invalid values are unrepresentable. Selection is
/// exclusive (exactly one active at a time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Simple,
    #[default]
    Moderate,
    Detailed,
}

impl DetailLevel {
    /// All levels in display order
    pub const ALL: [DetailLevel; 3] = [DetailLevel::Simple, DetailLevel::Moderate, DetailLevel::Detailed];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Simple => "simple",
            DetailLevel::Moderate => "moderate",
            DetailLevel::Detailed => "detailed",
        }
    }

    /// Human-readable label for the selector
    pub fn label(&self) -> &'static str {
        match self {
            DetailLevel::Simple => "Simple",
            DetailLevel::Moderate => "Moderate",
            DetailLevel::Detailed => "Detailed",
        }
    }

    /// Short description shown next to the label
    pub fn description(&self) -> &'static str {
        match self {
            DetailLevel::Simple => "Quick & concise",
            DetailLevel::Moderate => "Balanced (recommended)",
            DetailLevel::Detailed => "Comprehensive",
        }
    }

    /// Next level in display order, wrapping
    pub fn cycle(&self) -> DetailLevel {
        match self {
            DetailLevel::Simple => DetailLevel::Moderate,
            DetailLevel::Moderate => DetailLevel::Detailed,
            DetailLevel::Detailed => DetailLevel::Simple,
        }
    }

    /// Previous level in display order, wrapping
    pub fn cycle_back(&self) -> DetailLevel {
        match self {
            DetailLevel::Simple => DetailLevel::Detailed,
            DetailLevel::Moderate => DetailLevel::Simple,
            DetailLevel::Detailed => DetailLevel::Moderate,
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for POST /api/refine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSubmission {
    /// User-authored text, sent verbatim (not trimmed)
    pub raw_prompt: String,
    pub detail_level: DetailLevel,
}

/// Structured analysis the service infers from the raw prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAnalysis {
    pub intent: String,
    pub domain: String,
    pub role: String,
    pub output_format: String,
    /// Details the service added; may be empty or absent on the wire
    #[serde(default)]
    pub missing_details: Vec<String>,
}

/// Success response body from POST /api/refine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefineResult {
    pub refined_prompt: String,
    #[serde(default)]
    pub improvements: String,
    /// Optional - older service versions omit it entirely
    #[serde(default)]
    pub analysis: Option<PromptAnalysis>,
}

/// Response body from GET /api/health; extra fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_level_default_is_moderate() {
        assert_eq!(DetailLevel::default(), DetailLevel::Moderate);
    }

    #[test]
    fn test_detail_level_serializes_lowercase() {
        let submission = PromptSubmission {
            raw_prompt: "Write code for login page".to_string(),
            detail_level: DetailLevel::Moderate,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["raw_prompt"], "Write code for login page");
        assert_eq!(json["detail_level"], "moderate");
    }

    #[test]
    fn test_detail_level_deserializes_lowercase() {
        let level: DetailLevel = serde_json::from_str("\"detailed\"").unwrap();
        assert_eq!(level, DetailLevel::Detailed);
    }

    #[test]
    fn test_detail_level_rejects_unknown_values() {
        let result: Result<DetailLevel, _> = serde_json::from_str("\"verbose\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_detail_level_cycle_wraps() {
        assert_eq!(DetailLevel::Simple.cycle(), DetailLevel::Moderate);
        assert_eq!(DetailLevel::Detailed.cycle(), DetailLevel::Simple);
        assert_eq!(DetailLevel::Simple.cycle_back(), DetailLevel::Detailed);
    }

    #[test]
    fn test_detail_level_labels() {
        assert_eq!(DetailLevel::Simple.description(), "Quick & concise");
        assert_eq!(DetailLevel::Moderate.description(), "Balanced (recommended)");
        assert_eq!(DetailLevel::Detailed.description(), "Comprehensive");
    }

    #[test]
    fn test_refine_result_full_response() {
        let json = r#"{
            "refined_prompt": "Act as a developer...",
            "improvements": "Added role and constraints",
            "analysis": {
                "intent": "code_generation",
                "domain": "web_development",
                "role": "developer",
                "output_format": "code",
                "missing_details": ["target framework", "auth method"]
            }
        }"#;
        let result: RefineResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.refined_prompt, "Act as a developer...");
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis.intent, "code_generation");
        assert_eq!(analysis.missing_details.len(), 2);
    }

    #[test]
    fn test_refine_result_without_analysis() {
        let json = r#"{"refined_prompt": "text", "improvements": "better"}"#;
        let result: RefineResult = serde_json::from_str(json).unwrap();
        assert!(result.analysis.is_none());
    }

    #[test]
    fn test_analysis_without_missing_details() {
        let json = r#"{
            "intent": "explanation",
            "domain": "education",
            "role": "teacher",
            "output_format": "prose"
        }"#;
        let analysis: PromptAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.missing_details.is_empty());
    }
}
