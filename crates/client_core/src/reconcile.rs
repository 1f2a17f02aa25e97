//! Pure reconciliation of one assessment into the three UI projections.

use shared::domain::{Assessment, GeolocationClaim};

/// Latest risk score, clamped to `[0, 100]`. A replacement value, not an
/// accumulation: each assessment overwrites the previous score entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskProjection {
    score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Nominal,
    Caution,
    Alert,
}

impl RiskProjection {
    /// Out-of-range input is clamped, not rejected; the remote contract
    /// cannot be enforced at this boundary.
    pub fn clamped(raw: i64) -> Self {
        Self {
            score: raw.clamp(0, 100) as u8,
        }
    }

    pub fn score(self) -> u8 {
        self.score
    }

    /// Gauge fill fraction in `[0.0, 1.0]`.
    pub fn fill_fraction(self) -> f32 {
        f32::from(self.score) / 100.0
    }

    pub fn band(self) -> RiskBand {
        if self.score > 70 {
            RiskBand::Alert
        } else if self.score > 40 {
            RiskBand::Caution
        } else {
            RiskBand::Nominal
        }
    }
}

/// At most one active geolocation marker is derived from this at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoProjection {
    pub coords: (f64, f64),
    pub label: String,
    pub provider: String,
    pub address: String,
}

impl From<&GeolocationClaim> for GeoProjection {
    fn from(claim: &GeolocationClaim) -> Self {
        Self {
            coords: (claim.coords[0], claim.coords[1]),
            label: claim.location.clone(),
            provider: claim.isp.clone(),
            address: claim.ip.clone(),
        }
    }
}

/// The three coupled projections driven by the latest assessment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projections {
    pub risk: RiskProjection,
    pub intel: Vec<String>,
    pub geo: Option<GeoProjection>,
}

/// Derives the next projections from the previous ones and a fresh
/// assessment. Pure function of its inputs:
///
/// - risk is always replaced (clamped to `[0, 100]`);
/// - the intel list is fully replaced when the assessment carries facts,
///   otherwise left as-is;
/// - the geolocation is replaced when the assessment carries a claim;
///   absence of a claim never clears an existing marker.
pub fn reconcile(previous: &Projections, assessment: &Assessment) -> Projections {
    Projections {
        risk: RiskProjection::clamped(assessment.risk_score),
        intel: assessment
            .extracted_facts
            .clone()
            .unwrap_or_else(|| previous.intel.clone()),
        geo: assessment
            .geolocation
            .as_ref()
            .map(GeoProjection::from)
            .or_else(|| previous.geo.clone()),
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
