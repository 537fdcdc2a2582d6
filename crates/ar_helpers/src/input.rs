use core::time::Duration;

use bevy::prelude::*;

/// Discrete gestures delivered to the game. A double tap is reported in
/// addition to the tap that completed it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Tapped,
    DoubleTapped,
}

#[derive(Reflect, Resource, Debug, Clone)]
#[reflect(Resource)]
pub struct GestureSettings {
    pub double_tap_window: Duration,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            double_tap_window: Duration::from_millis(300),
        }
    }
}

/// Turns a stream of raw presses into gestures.
#[derive(Resource, Debug, Default)]
pub struct TapRecognizer {
    last_tap: Option<Duration>,
}

impl TapRecognizer {
    /// Registers a press at `now` and returns the gestures it produces.
    pub fn press(&mut self, now: Duration, window: Duration) -> Vec<GestureEvent> {
        let is_double = self
            .last_tap
            .is_some_and(|last| now.saturating_sub(last) <= window);

        // A completed double tap does not start the next pair
        self.last_tap = if is_double { None } else { Some(now) };

        if is_double {
            vec![GestureEvent::Tapped, GestureEvent::DoubleTapped]
        } else {
            vec![GestureEvent::Tapped]
        }
    }
}

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GestureSettings>()
            .init_resource::<GestureSettings>()
            .init_resource::<TapRecognizer>()
            .add_event::<GestureEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_single_press_is_a_tap() {
        let mut recognizer = TapRecognizer::default();
        let gestures = recognizer.press(Duration::from_secs(1), WINDOW);
        assert_eq!(gestures, vec![GestureEvent::Tapped], "lone press");
    }

    #[test]
    fn test_two_quick_presses_make_a_double_tap() {
        let mut recognizer = TapRecognizer::default();
        recognizer.press(Duration::from_millis(1000), WINDOW);
        let gestures = recognizer.press(Duration::from_millis(1200), WINDOW);
        assert_eq!(
            gestures,
            vec![GestureEvent::Tapped, GestureEvent::DoubleTapped],
            "second press inside the window"
        );
    }

    #[test]
    fn test_slow_presses_stay_single_taps() {
        let mut recognizer = TapRecognizer::default();
        recognizer.press(Duration::from_millis(1000), WINDOW);
        let gestures = recognizer.press(Duration::from_millis(1400), WINDOW);
        assert_eq!(gestures, vec![GestureEvent::Tapped], "outside the window");
    }

    #[test]
    fn test_triple_press_yields_one_double_tap() {
        let mut recognizer = TapRecognizer::default();
        recognizer.press(Duration::from_millis(0), WINDOW);
        recognizer.press(Duration::from_millis(100), WINDOW);
        let third = recognizer.press(Duration::from_millis(200), WINDOW);
        assert_eq!(third, vec![GestureEvent::Tapped], "pair was consumed");
    }
}
