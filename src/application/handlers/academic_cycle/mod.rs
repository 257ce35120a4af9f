//! Academic cycle handlers.
//!
//! ## Queries
//! - Resolve the system (active) cycle and the Director's selected cycle
//! - List cycles for the selector
//!
//! ## Commands
//! - Create a cycle (inactive)
//! - Activate a cycle (deactivates every other one)
//! - Select a cycle for the current session

mod activate_cycle;
mod create_cycle;
mod list_cycles;
mod resolver;
mod select_cycle;

pub use activate_cycle::{ActivateCycleCommand, ActivateCycleHandler};
pub use create_cycle::{CreateCycleCommand, CreateCycleHandler};
pub use list_cycles::ListCyclesHandler;
pub use resolver::CycleResolver;
pub use select_cycle::{SelectCycleCommand, SelectCycleHandler, SelectCycleResult};
