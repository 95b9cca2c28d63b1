use super::{back_button, side_panel, zoom_slider};
use crate::core::state::AppState;
use crate::simulation::ActiveSession;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use fluidcore::controls::{MAX_TEMPERATURE, MIN_TEMPERATURE};
use fluidcore::{Scenario, Substance};

pub fn render_viscosity_panel(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveSession>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let session = &mut active.session;

    side_panel("viscosity_panel").show(ctx, |ui| {
        ui.heading(Scenario::Viscosity.title());
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            for substance in Substance::ALL {
                let selected = session.controls().selected_tube() == substance;
                if ui.selectable_label(selected, substance.label()).clicked() {
                    session.select_tube(substance);
                }
            }
        });
        ui.add_space(10.0);

        for substance in Substance::ALL {
            let selected = session.controls().selected_tube() == substance;
            let title = egui::RichText::new(substance.label());
            ui.label(if selected { title.strong().underline() } else { title });

            let mut celsius = session.controls().temperature(substance);
            let slider = egui::Slider::new(&mut celsius, MIN_TEMPERATURE..=MAX_TEMPERATURE)
                .step_by(1.0)
                .suffix(" °C")
                .text("Temperature");
            if ui.add(slider).changed() {
                session.set_temperature(substance, celsius);
                session.select_tube(substance);
            }
            ui.label(format!("Viscosity: {:.2}", session.viscosity(substance)));
            ui.add_space(8.0);
        }

        zoom_slider(ui, session);

        back_button(ui, &mut next_state);
    });
}
