use bevy::prelude::Resource;
use tracing::debug;

use super::gauge::PowerGauge;
use super::surface::SurfaceStatus;

/// The bucket is placed once per session and never moves again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Searching,
    Placed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    Ignored,
    Placed,
    ChargingStarted,
    Throw { power: f32 },
}

/// Interaction state advanced by taps and frames.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    placement: Placement,
    surface: SurfaceStatus,
    gauge: PowerGauge,
}

impl GameSession {
    pub fn new(gauge: PowerGauge) -> Self {
        Self {
            placement: Placement::Searching,
            surface: SurfaceStatus::NoSurface,
            gauge,
        }
    }

    pub const fn placement(&self) -> Placement {
        self.placement
    }

    pub const fn surface(&self) -> SurfaceStatus {
        self.surface
    }

    pub const fn gauge(&self) -> &PowerGauge {
        &self.gauge
    }

    /// Records this frame's raycast result. Ignored once placed.
    pub fn observe_surface(&mut self, status: SurfaceStatus) {
        if self.placement == Placement::Searching {
            self.surface = status;
        }
    }

    /// True when the next tap releases the gauge.
    pub fn throws_on_tap(&self) -> bool {
        self.placement == Placement::Placed && self.gauge.is_charging()
    }

    pub fn tap(&mut self) -> TapOutcome {
        match self.placement {
            Placement::Searching if self.surface.is_valid() => {
                self.placement = Placement::Placed;
                TapOutcome::Placed
            }
            Placement::Searching => {
                debug!("Tap ignored on {} surface", self.surface);
                TapOutcome::Ignored
            }
            Placement::Placed if self.gauge.is_charging() => TapOutcome::Throw {
                power: self.gauge.release(),
            },
            Placement::Placed => {
                self.gauge.start();
                TapOutcome::ChargingStarted
            }
        }
    }

    pub fn frame(&mut self) {
        if self.placement == Placement::Placed {
            self.gauge.tick();
        }
    }
}
