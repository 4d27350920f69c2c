//! spamscore Server
//!
//! HTTP front end for spam propensity scoring. The classifier and vectorizer
//! are loaded once at startup into an explicit [`AppState`] and shared
//! read-only by every request.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use cli::{Cli, LogFormat};
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
