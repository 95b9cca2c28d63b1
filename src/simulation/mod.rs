// Lifetime of a scenario: build on enter, tick every frame, tear down on exit

use crate::core::state::AppState;
use crate::render::surface::{BevySurface, SurfaceRegistry};
use crate::MENU_CLEAR_COLOR;
use bevy::prelude::*;
use fluidcore::surface::HandleTable;
use fluidcore::{Scenario, SimulationSession, get_config, reload_config};

/// Session of the scenario on screen and the handles its scene was built with.
#[derive(Resource)]
pub(crate) struct ActiveSession {
    pub session: SimulationSession,
    pub handles: HandleTable,
}

/// Everything spawned for a scenario, despawned when it is left.
#[derive(Component)]
pub(crate) struct ScenarioEntity;

pub(crate) struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        for state in AppState::SCENARIOS {
            app.add_systems(OnEnter(state), enter_scenario)
                .add_systems(OnExit(state), exit_scenario);
        }
        app.add_systems(
            Update,
            tick_session.run_if(resource_exists::<ActiveSession>),
        );
    }
}

fn enter_scenario(
    state: Res<State<AppState>>,
    mut clear_color: ResMut<ClearColor>,
    mut surface: BevySurface,
) {
    let Some(scenario) = state.get().scenario() else {
        return;
    };

    // Pick up edits to the config file without restarting
    reload_config();
    let config = get_config();
    let [r, g, b] = match scenario {
        Scenario::Fluids => config.volume.clear_color,
        Scenario::Thermal => config.thermal.clear_color,
        Scenario::Viscosity => config.viscosity.clear_color,
    };
    clear_color.0 = Color::srgb(r, g, b);
    surface.reset_orbit(&config.camera);

    let mut session = SimulationSession::new(scenario, config);
    let handles = session.build_scene(&mut surface);
    info!("Entered {} scenario", scenario.title());

    surface
        .commands
        .insert_resource(ActiveSession { session, handles });
}

fn tick_session(time: Res<Time>, mut active: ResMut<ActiveSession>, mut surface: BevySurface) {
    let ActiveSession { session, handles } = &mut *active;
    session.tick(time.delta_secs(), handles, &mut surface);
}

fn exit_scenario(
    mut commands: Commands,
    entities: Query<Entity, With<ScenarioEntity>>,
    mut registry: ResMut<SurfaceRegistry>,
    mut clear_color: ResMut<ClearColor>,
) {
    let mut count = 0;
    for entity in &entities {
        commands.entity(entity).despawn();
        count += 1;
    }
    registry.clear();
    commands.remove_resource::<ActiveSession>();
    clear_color.0 = MENU_CLEAR_COLOR;
    info!("Left scenario, despawned {count} entities");
}
