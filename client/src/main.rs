// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

mod camera;
mod convert;
mod debug_tools;
mod goal;
mod grapple;
mod input;
mod player;
mod world;

#[cfg(target_os = "macos")]
use bevy::window::CompositeAlphaMode;

use bevy::prelude::*;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grapple".to_string(),
                fit_canvas_to_parent: true,
                #[cfg(target_os = "macos")]
                composite_alpha_mode: CompositeAlphaMode::PostMultiplied,
                ..default()
            }),
            ..default()
        }));

        app.add_plugins((
            input::plugin,
            world::plugin,
            player::plugin,
            camera::plugin,
            grapple::plugin,
            goal::plugin,
            debug_tools::plugin,
        ));
    }
}
