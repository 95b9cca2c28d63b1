pub mod config;
pub mod controls;
pub mod drop;
pub mod error;
pub mod session;
pub mod surface;
pub mod thermal;
pub mod viscosity;
pub mod volume;

pub use config::{get_config, reload_config};
pub use controls::{ContainerKind, Scenario, Substance};
pub use session::SimulationSession;
