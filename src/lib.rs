//! Recommendation service: a single HTTP endpoint that suggests a random lunch.
//!
//! `GET /recommendation` answers with `{"recommendation": "<option>"}`, where
//! the option is drawn uniformly from a fixed, non-empty list.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod options;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use options::{OptionList, OptionListError, LUNCH_OPTIONS};
pub use routes::create_router;
pub use state::AppState;
