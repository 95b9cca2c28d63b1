use super::{back_button, bounded_slider, side_panel, zoom_slider};
use crate::core::state::AppState;
use crate::simulation::ActiveSession;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use fluidcore::Scenario;

pub fn render_fluids_panel(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let session = &mut active.session;

    side_panel("fluids_panel").show(ctx, |ui| {
        ui.heading(Scenario::Fluids.title());
        ui.add_space(10.0);
        ui.label(egui::RichText::new(session.step_caption()).strong());
        ui.add_space(10.0);

        let controls = session.controls();
        if let Some(size) = bounded_slider(
            ui,
            "Container size",
            controls.container_size(),
            controls.limits().container_size,
            0.1,
        ) {
            session.set_container_size(size);
        }
        zoom_slider(ui, session);

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let can_advance = !session.controls().step().is_final();
            if ui.add_enabled(can_advance, egui::Button::new("Next step")).clicked() {
                session.advance_step();
            }
            if ui.button("Reset").clicked() {
                session.reset_simulation();
            }
        });

        back_button(ui, &mut next_state);
    });
}
