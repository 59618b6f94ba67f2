//! Configuration store for the badge-scan attendance pipeline.
//!
//! Owns the JSON configuration document: endpoint, debounce interval, the
//! two-representation roster (legacy `nomes` + structured `alunos`), the
//! weekly theory-day set and the calendar overrides. Loaded once at start,
//! reloaded wholesale when the wall-clock date advances, and written back
//! by inline registration and the override-management commands.

pub mod error;
pub mod model;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use model::{Config, RosterEntry};
pub use store::ConfigStore;
