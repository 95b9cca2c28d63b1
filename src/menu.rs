use crate::core::state::AppState;
use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use fluidcore::Scenario;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            render_main_menu.run_if(in_state(AppState::MainMenu)),
        );
    }
}

fn render_main_menu(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<AppState>>,
    mut app_exit_events: MessageWriter<AppExit>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading("Fluid Lab");
            ui.label("Pick a simulation");
            ui.add_space(30.0);

            for scenario in Scenario::ALL {
                let button = egui::Button::new(scenario.title()).min_size(egui::vec2(260.0, 40.0));
                if ui.add(button).clicked() {
                    next_state.set(AppState::from_scenario(scenario));
                }
                ui.add_space(10.0);
            }

            ui.add_space(20.0);
            if ui.button("Quit").clicked() {
                app_exit_events.write(AppExit::Success);
            }
        });
    });
}
