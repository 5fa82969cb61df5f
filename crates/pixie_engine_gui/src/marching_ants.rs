use std::time::Instant;

use once_cell::sync::Lazy;

static ANTS_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Milliseconds since the first call; the shared clock for [`MarchingAnts::update`].
pub fn now_ms() -> u128 {
    ANTS_START.elapsed().as_millis()
}

/// Dash phase of the animated selection outline.
#[derive(Debug, Clone, PartialEq)]
pub struct MarchingAnts {
    phase: f32,
    dash_length: f32,
    /// Widget pixels per second
    speed: f32,
    last_update: Option<u128>,
}

impl MarchingAnts {
    pub fn new(dash_length: f32, speed: f32) -> Self {
        Self {
            phase: 0.0,
            dash_length: dash_length.max(1.0),
            speed,
            last_update: None,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn dash_length(&self) -> f32 {
        self.dash_length
    }

    /// Advances the phase to `cur_ms`. Returns true if the phase changed.
    pub fn update(&mut self, cur_ms: u128) -> bool {
        let Some(last) = self.last_update.replace(cur_ms) else {
            return false;
        };
        if cur_ms <= last || self.speed == 0.0 {
            return false;
        }
        let elapsed = (cur_ms - last) as f32 / 1000.0;
        // one period is a dash plus a gap
        self.phase = (self.phase + elapsed * self.speed).rem_euclid(self.dash_length * 2.0);
        true
    }

    /// Returns true if the settings changed.
    pub fn set_style(&mut self, dash_length: f32, speed: f32) -> bool {
        let dash_length = dash_length.max(1.0);
        if self.dash_length != dash_length || self.speed != speed {
            self.dash_length = dash_length;
            self.speed = speed;
            self.phase = self.phase.rem_euclid(dash_length * 2.0);
            true
        } else {
            false
        }
    }
}
