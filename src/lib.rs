//! AAS repository: CRUD HTTP API for Asset Administration Shell records
//! over an embedded SQLite store, with a reversible identifier codec.

pub mod codec;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use codec::{decode_id, encode_id, DecodeError};
pub use config::AppConfig;
pub use docs::{docs_routes, ApiDoc};
pub use error::AppError;
pub use routes::{common_routes, shell_routes};
pub use service::ShellService;
pub use state::AppState;
pub use store::{connect, ensure_database_dir, ensure_shell_table};
