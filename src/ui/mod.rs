mod fluids;
mod thermal;
mod viscosity;

use crate::core::state::AppState;
use crate::simulation::ActiveSession;
use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};
use fluidcore::SimulationSession;
use fluidcore::controls::Bounds;

pub(crate) struct ScenarioUiPlugin;

impl Plugin for ScenarioUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (
                fluids::render_fluids_panel.run_if(in_state(AppState::Fluids)),
                thermal::render_thermal_panel.run_if(in_state(AppState::Thermal)),
                viscosity::render_viscosity_panel.run_if(in_state(AppState::Viscosity)),
            )
                .run_if(resource_exists::<ActiveSession>),
        );
    }
}

const PANEL_WIDTH: f32 = 320.0;

fn side_panel(id: &'static str) -> egui::SidePanel {
    egui::SidePanel::right(id)
        .default_width(PANEL_WIDTH)
        .resizable(false)
}

/// Slider over `bounds` that writes back only when the user moved it.
fn bounded_slider(ui: &mut egui::Ui, label: &str, value: f32, bounds: Bounds, step: f64) -> Option<f32> {
    let mut edited = value;
    let response = ui.add(
        egui::Slider::new(&mut edited, bounds.min..=bounds.max)
            .step_by(step)
            .text(label),
    );
    response.changed().then_some(edited)
}

fn zoom_slider(ui: &mut egui::Ui, session: &mut SimulationSession) {
    let controls = session.controls();
    if let Some(zoom) = bounded_slider(ui, "Zoom", controls.zoom_level(), controls.limits().zoom, 0.5) {
        session.set_zoom(zoom);
    }
}

fn back_button(ui: &mut egui::Ui, next_state: &mut NextState<AppState>) {
    ui.add_space(20.0);
    ui.separator();
    ui.add_space(10.0);
    if ui.button("Back").clicked() {
        next_state.set(AppState::MainMenu);
    }
}
