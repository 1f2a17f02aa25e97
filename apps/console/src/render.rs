//! Terminal rendering of the three projections plus the terminal-backed
//! map and speech collaborators.

use client_core::adapters::{MapSurface, MarkerHandle, SpeechEngine};
use client_core::reconcile::{GeoProjection, RiskBand, RiskProjection};
use shared::domain::{Message, Role};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const GAUGE_CELLS: usize = 20;

fn band_color(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Alert => RED,
        RiskBand::Caution => YELLOW,
        RiskBand::Nominal => GREEN,
    }
}

/// Numeric readout plus a bar whose fill fraction is score/100.
pub fn render_gauge(risk: RiskProjection) -> String {
    let filled = ((risk.fill_fraction() * GAUGE_CELLS as f32).round() as usize).min(GAUGE_CELLS);
    let color = band_color(risk.band());
    format!(
        "RISK {color}{:>3}{RESET} [{color}{}{RESET}{}]",
        risk.score(),
        "#".repeat(filled),
        ".".repeat(GAUGE_CELLS - filled),
    )
}

pub fn render_message(message: &Message) -> String {
    let (tag, color) = match message.role {
        Role::Operator => ("OPERATOR", CYAN),
        Role::Counterpart => ("COUNTERPART", GREEN),
        Role::System => ("SYSTEM", YELLOW),
    };
    format!(
        "[{} UTC] {color}{tag}{RESET} {}",
        message.sent_at.format("%H:%M:%S"),
        message.text,
    )
}

pub fn render_intel(facts: &[String]) -> String {
    facts
        .iter()
        .map(|fact| format!("  * {fact}\n"))
        .collect()
}

#[derive(Debug, Default)]
pub struct TerminalMapSurface {
    next_handle: u64,
}

impl MapSurface for TerminalMapSurface {
    fn fly_to(&mut self, lat: f64, lng: f64) {
        println!("MAP: panning to {lat:.4}, {lng:.4}");
    }

    fn place_marker(&mut self, geo: &GeoProjection) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        println!(
            "LOCKED ON: {} // ISP: {} // IP: {}",
            geo.label.to_uppercase(),
            geo.provider,
            geo.address,
        );
        handle
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {}
}

pub struct TerminalSpeech;

impl SpeechEngine for TerminalSpeech {
    fn cancel(&mut self) {}

    fn speak(&mut self, text: &str) {
        println!("VOICE: {text}");
    }
}
