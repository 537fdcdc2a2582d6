#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GaugeDirection {
    #[default]
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GaugeState {
    #[default]
    Idle,
    Charging,
}

/// Throw power oscillating between zero and `max_power` while charging.
///
/// The value is kept as a whole number of steps so the waveform repeats
/// exactly every `2 * max_power / step` frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerGauge {
    steps: u32,
    peak_steps: u32,
    step: f32,
    max_power: f32,
    direction: GaugeDirection,
    state: GaugeState,
}

impl PowerGauge {
    pub fn new(max_power: f32, step: f32) -> Self {
        let peak_steps = (max_power / step).round().max(1.0) as u32;
        Self {
            steps: 0,
            peak_steps,
            step,
            max_power,
            direction: GaugeDirection::Increasing,
            state: GaugeState::Idle,
        }
    }

    pub fn value(&self) -> f32 {
        (self.steps as f32 * self.step).clamp(0.0, self.max_power)
    }

    pub const fn direction(&self) -> GaugeDirection {
        self.direction
    }

    pub const fn state(&self) -> GaugeState {
        self.state
    }

    pub fn is_charging(&self) -> bool {
        self.state == GaugeState::Charging
    }

    pub fn start(&mut self) {
        self.state = GaugeState::Charging;
    }

    /// Advances one frame. Does nothing unless charging.
    pub fn tick(&mut self) {
        if !self.is_charging() {
            return;
        }

        match self.direction {
            GaugeDirection::Increasing => {
                self.steps = (self.steps + 1).min(self.peak_steps);
                if self.steps >= self.peak_steps {
                    self.direction = GaugeDirection::Decreasing;
                }
            }
            GaugeDirection::Decreasing => {
                self.steps = self.steps.saturating_sub(1);
                if self.steps == 0 {
                    self.direction = GaugeDirection::Increasing;
                }
            }
        }
    }

    /// Locks in the current power and resets the gauge for the next throw.
    pub fn release(&mut self) -> f32 {
        let power = self.value();
        self.steps = 0;
        self.direction = GaugeDirection::Increasing;
        self.state = GaugeState::Idle;
        power
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charging_gauge() -> PowerGauge {
        let mut gauge = PowerGauge::new(15.0, 0.05);
        gauge.start();
        gauge
    }

    #[test]
    fn test_idle_gauge_does_not_move() {
        let mut gauge = PowerGauge::new(15.0, 0.05);
        for _ in 0..100 {
            gauge.tick();
        }
        assert_eq!(gauge.value(), 0.0, "idle gauge stays at zero");
    }

    #[test]
    fn test_reaches_peak_after_300_frames() {
        let mut gauge = charging_gauge();
        for _ in 0..300 {
            gauge.tick();
        }
        assert!((gauge.value() - 15.0).abs() < 1e-4, "peak is 15");
        assert_eq!(
            gauge.direction(),
            GaugeDirection::Decreasing,
            "turns around at the peak"
        );
    }

    #[test]
    fn test_returns_to_zero_after_600_frames() {
        let mut gauge = charging_gauge();
        for _ in 0..600 {
            gauge.tick();
        }
        assert_eq!(gauge.value(), 0.0, "back to zero");
        assert_eq!(
            gauge.direction(),
            GaugeDirection::Increasing,
            "turns around at zero"
        );
    }

    #[test]
    fn test_waveform_is_periodic() {
        let mut gauge = charging_gauge();

        let mut samples = Vec::new();
        for _ in 0..1800 {
            gauge.tick();
            samples.push(gauge.value());
        }
        for (early, late) in samples.iter().zip(samples.iter().skip(600)) {
            assert_eq!(early, late, "value repeats one period later");
        }
    }

    #[test]
    fn test_value_stays_in_range() {
        let mut gauge = charging_gauge();
        for _ in 0..10_000 {
            gauge.tick();
            let value = gauge.value();
            assert!((0.0..=15.0).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn test_release_returns_power_and_resets() {
        let mut gauge = charging_gauge();
        for _ in 0..100 {
            gauge.tick();
        }
        let power = gauge.release();
        assert!((power - 5.0).abs() < 1e-4, "100 steps of 0.05");
        assert_eq!(gauge.value(), 0.0, "reset after release");
        assert_eq!(gauge.state(), GaugeState::Idle, "idle after release");
        assert_eq!(
            gauge.direction(),
            GaugeDirection::Increasing,
            "next charge rises first"
        );
    }
}
