use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(SeqNo);

impl SeqNo {
    pub fn next(self) -> SeqNo {
        SeqNo(self.0 + 1)
    }
}

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Operator,
    Counterpart,
    System,
}

/// One immutable transcript entry. Sequence numbers are assigned by the
/// transcript store at append time and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub seq: SeqNo,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Geolocation claim attached to an assessment. Field names follow the
/// analysis service payload: an IP-like address, a provider name, a
/// human-readable location label and `[latitude, longitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationClaim {
    pub ip: String,
    pub isp: String,
    pub location: String,
    pub coords: [f64; 2],
}

/// Structured result of one conversational exchange. Produced once per
/// request/response cycle and consumed immediately by the reconciler.
///
/// `risk_score` is kept wider than the nominal `[0, 100]` range on purpose:
/// the remote contract cannot be enforced at the boundary, so out-of-range
/// values survive parsing and are clamped downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub reply: String,
    pub risk_score: i64,
    pub extracted_facts: Option<Vec<String>>,
    pub geolocation: Option<GeolocationClaim>,
}
