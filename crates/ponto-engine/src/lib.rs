//! Event intake and classification pipeline.
//!
//! This crate owns the sequential flow of control from raw input line to
//! feedback cue: debounce and format validation, theory-day classification,
//! roster resolution with inline registration, and delivery dispatch. There
//! is exactly one logical flow of control; nothing runs in the background
//! and no event is processed concurrently with another.

pub mod classifier;
pub mod debounce;
pub mod roster;
pub mod session;

pub use classifier::{DayClassification, DayClassifier, classify};
pub use debounce::{RejectReason, ScanDebouncer, ScanOutcome};
pub use roster::{Resolution, RosterResolver};
pub use session::{Session, SessionState, SessionStateMachine};
