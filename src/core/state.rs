use bevy::prelude::States;
use fluidcore::Scenario;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum AppState {
    #[default]
    MainMenu,
    Fluids,
    Thermal,
    Viscosity,
}

impl AppState {
    pub(crate) const SCENARIOS: [AppState; 3] =
        [AppState::Fluids, AppState::Thermal, AppState::Viscosity];

    pub(crate) fn scenario(self) -> Option<Scenario> {
        match self {
            AppState::MainMenu => None,
            AppState::Fluids => Some(Scenario::Fluids),
            AppState::Thermal => Some(Scenario::Thermal),
            AppState::Viscosity => Some(Scenario::Viscosity),
        }
    }

    pub(crate) fn from_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Fluids => AppState::Fluids,
            Scenario::Thermal => AppState::Thermal,
            Scenario::Viscosity => AppState::Viscosity,
        }
    }
}
