use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Hold to aim, release to fly.
    Grapple,
    CancelGrapple,
    IncreaseRange,
    DecreaseRange,
    Respawn,
    ToggleDebug,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Grapple, MouseButton::Left);
    input_map.insert(InputAction::CancelGrapple, MouseButton::Right);
    input_map.insert(InputAction::IncreaseRange, KeyCode::BracketRight);
    input_map.insert(InputAction::DecreaseRange, KeyCode::BracketLeft);
    input_map.insert(InputAction::Respawn, KeyCode::KeyR);
    input_map.insert(InputAction::ToggleDebug, KeyCode::F3);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
