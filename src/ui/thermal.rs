use super::{back_button, bounded_slider, side_panel, zoom_slider};
use crate::core::state::AppState;
use crate::simulation::ActiveSession;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use fluidcore::controls::MAX_TEMPERATURE_LEVEL;
use fluidcore::{ContainerKind, Scenario, SimulationSession};

pub fn render_thermal_panel(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let session = &mut active.session;

    side_panel("thermal_panel").show(ctx, |ui| {
        ui.heading(Scenario::Thermal.title());
        ui.add_space(10.0);

        ui.label(egui::RichText::new("Liquid").strong());
        temperature_slider(ui, session, ContainerKind::Liquid);
        let controls = session.controls();
        if let Some(fill) = bounded_slider(
            ui,
            "Fill level",
            controls.liquid_fill(),
            controls.limits().liquid_fill,
            0.05,
        ) {
            session.set_liquid_fill(fill);
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Gas").strong());
        temperature_slider(ui, session, ContainerKind::Gas);
        let controls = session.controls();
        if let Some(size) = bounded_slider(
            ui,
            "Container size",
            controls.gas_size(),
            controls.limits().gas_size,
            0.05,
        ) {
            session.set_gas_size(size);
        }

        ui.add_space(10.0);
        zoom_slider(ui, session);

        back_button(ui, &mut next_state);
    });
}

fn temperature_slider(ui: &mut egui::Ui, session: &mut SimulationSession, kind: ContainerKind) {
    let mut level = session.controls().temperature_level(kind) as i32;
    let slider = egui::Slider::new(&mut level, 0..=MAX_TEMPERATURE_LEVEL as i32).text("Temperature");
    if ui.add(slider).changed() {
        session.set_temperature_level(kind, level);
    }
}
