//! HomeFix intake API.
//!
//! Records waitlist signups and contact form messages from the landing page
//! into process-lifetime storage.
//!
//! Request flow: route handler -> [`intake::IntakeService`] (shape check and
//! policy) -> [`storage::Storage`] -> JSON envelope.

pub mod config;
pub mod error;
pub mod intake;
pub mod routes;
pub mod storage;

pub use config::Config;
pub use intake::{IntakeError, IntakePolicy, IntakeService};
pub use routes::{build_router, AppState};
pub use storage::{MemStorage, Storage, StorageError};
