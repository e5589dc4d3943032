// Core algorithm exports
pub mod keys;
pub mod procedure;
pub mod simulation;

pub use keys::StoreKey;
pub use procedure::{swipe_and_check_match, ProcedureScope, SWIPE_AND_CHECK_MATCH};
pub use simulation::{generate_users, SimulationConfig, SimulationReport, SwipeSimulator};
