use bevy::prelude::{GamepadButton, KeyCode, MouseButton, Reflect};
use leafwing_input_manager::prelude::*;

// Desktop stand-ins for the headset: taps, walking and turning the head
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum Action {
    Tap,
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
}

pub fn create_input_map() -> InputMap<Action> {
    let mut input_map = InputMap::default();

    input_map.insert(Action::Tap, KeyCode::Space);
    input_map.insert(Action::Tap, MouseButton::Left);
    input_map.insert(Action::Tap, GamepadButton::South);

    input_map.insert_dual_axis(Action::Move, VirtualDPad::wasd());
    input_map.insert_dual_axis(Action::Move, GamepadStick::LEFT);
    input_map.insert_dual_axis(Action::Look, VirtualDPad::arrow_keys());
    input_map.insert_dual_axis(Action::Look, GamepadStick::RIGHT);

    input_map
}
