mod core;
mod helpers;
mod menu;
mod render;
mod simulation;
mod ui;

use crate::core::camera::CameraPlugin;
use crate::core::state::AppState;
use crate::menu::MenuPlugin;
use crate::render::RenderPlugin;
use crate::simulation::SimulationPlugin;
use crate::ui::ScenarioUiPlugin;

use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

/// Background while no scenario is running.
pub const MENU_CLEAR_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);

pub struct FluidLabPlugin;

impl Plugin for FluidLabPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins(EguiPlugin::default())
            .add_plugins((
                CameraPlugin,
                MenuPlugin,
                RenderPlugin,
                SimulationPlugin,
                ScenarioUiPlugin,
            ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
