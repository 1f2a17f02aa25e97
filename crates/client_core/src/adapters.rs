//! Presentation-adapter contracts. The map surface and speech engine are
//! external collaborators consumed through these traits; the adapters own
//! the small amount of state the collaborators require (the single live
//! marker, the voice-enabled flag) so the core stays free of it.

use crate::reconcile::GeoProjection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// A rendering surface that can pan to coordinates and host one labeled
/// marker at a time.
pub trait MapSurface: Send {
    fn fly_to(&mut self, lat: f64, lng: f64);
    fn place_marker(&mut self, geo: &GeoProjection) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
}

#[derive(Debug, Default)]
pub struct NullMapSurface {
    next_handle: u64,
}

impl MapSurface for NullMapSurface {
    fn fly_to(&mut self, _lat: f64, _lng: f64) {}

    fn place_marker(&mut self, _geo: &GeoProjection) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {}
}

/// Drives a `MapSurface` from geolocation projections, keeping at most one
/// live marker. The previous marker is released before its replacement is
/// installed.
pub struct MapAdapter<S: MapSurface> {
    surface: S,
    marker: Option<MarkerHandle>,
}

impl<S: MapSurface> MapAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            marker: None,
        }
    }

    pub fn apply(&mut self, geo: &GeoProjection) {
        let (lat, lng) = geo.coords;
        self.surface.fly_to(lat, lng);
        if let Some(previous) = self.marker.take() {
            self.surface.remove_marker(previous);
        }
        self.marker = Some(self.surface.place_marker(geo));
    }

    pub fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }
}

/// Text-to-speech collaborator. Fire-and-forget: nothing flows back.
pub trait SpeechEngine: Send {
    fn cancel(&mut self);
    fn speak(&mut self, text: &str);
}

pub struct NullSpeechEngine;

impl SpeechEngine for NullSpeechEngine {
    fn cancel(&mut self) {}
    fn speak(&mut self, _text: &str) {}
}

/// Speaks counterpart replies when enabled. New speech preempts old: the
/// current utterance is canceled before the next one starts.
pub struct VoiceAdapter<E: SpeechEngine> {
    engine: E,
    enabled: bool,
}

impl<E: SpeechEngine> VoiceAdapter<E> {
    pub fn new(engine: E, enabled: bool) -> Self {
        Self { engine, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn on_reply(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        self.engine.cancel();
        self.engine.speak(text);
    }
}

#[cfg(test)]
#[path = "tests/adapters_tests.rs"]
mod tests;
