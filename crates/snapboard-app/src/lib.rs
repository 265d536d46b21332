//! Snapboard Application
//!
//! Application shell around the toolbar controller: scripted native sessions
//! and the browser entry point.

mod error;
pub mod script;
mod session;
mod shortcuts;

pub use error::{AppError, AppResult};
pub use script::{Step, load_script, parse_script};
pub use session::Session;
pub use shortcuts::{ControlHelp, print_controls};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
