//! spamscore Core
//!
//! Types shared by every spamscore component:
//! - The error taxonomy used by the scorer, the model loader and the server
//! - The `ScoreResult` returned for each scored text

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::ScoreResult;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::ScoreResult;
}
