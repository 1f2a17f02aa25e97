use serde::{Deserialize, Serialize};

use crate::domain::{Assessment, GeolocationClaim};

/// Body posted to the analysis endpoint for every operator submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub session_id: String,
    pub message: String,
}

/// Body returned by the analysis endpoint. `reply` and `risk` are required;
/// a body missing either is treated as malformed by the caller. `extracted`
/// and `intel` are optional and their absence leaves the corresponding
/// projection untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub reply: String,
    pub risk: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intel: Option<GeolocationClaim>,
}

impl From<AnalyzeResponse> for Assessment {
    fn from(value: AnalyzeResponse) -> Self {
        Assessment {
            reply: value.reply,
            risk_score: value.risk,
            extracted_facts: value.extracted,
            geolocation: value.intel,
        }
    }
}
