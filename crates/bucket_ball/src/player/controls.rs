use ar_helpers::input::{GestureEvent, GestureSettings, TapRecognizer};
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::player::inputs::Action;
use crate::player::{HeadRig, HeadRigSettings};

pub fn recognize_gestures(
    query: Query<&ActionState<Action>>,
    touch_input: Res<Touches>,
    time: Res<Time>,
    settings: Res<GestureSettings>,
    mut recognizer: ResMut<TapRecognizer>,
    mut gestures: EventWriter<GestureEvent>,
) {
    let Ok(action_state) = query.get_single() else {
        return;
    };

    // Leafwing Input Manager doesn't support touch input, so we need to check for it here
    if action_state.just_pressed(&Action::Tap) || touch_input.any_just_pressed() {
        for gesture in recognizer.press(time.elapsed(), settings.double_tap_window) {
            gestures.send(gesture);
        }
    }
}

pub fn move_head(
    mut query: Query<(&ActionState<Action>, &mut HeadRig, &mut Transform)>,
    settings: Res<HeadRigSettings>,
    time: Res<Time>,
) {
    let Ok((action_state, mut rig, mut transform)) = query.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    let look = action_state.axis_pair(&Action::Look);
    if look != Vec2::ZERO {
        rig.yaw -= look.x * settings.look_speed * dt;
        rig.pitch = look
            .y
            .mul_add(settings.look_speed * dt, rig.pitch)
            .clamp(-HeadRig::MAX_PITCH, HeadRig::MAX_PITCH);
        transform.rotation = rig.rotation();
    }

    let movement = action_state.axis_pair(&Action::Move);
    if movement != Vec2::ZERO {
        // Walk on the ground plane whatever the pitch
        let yaw = Quat::from_rotation_y(rig.yaw);
        let forward = yaw * Vec3::NEG_Z;
        let right = yaw * Vec3::X;
        let step = (forward * movement.y + right * movement.x) * settings.move_speed * dt;
        transform.translation += step;
    }
}
