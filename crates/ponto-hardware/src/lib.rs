//! Peripheral abstraction layer for the badge-scan attendance kiosk.
//!
//! This crate provides trait-based abstractions for the kiosk peripherals:
//! the keyboard-emulating NFC reader (a line-oriented input stream), the
//! audible feedback signaler and the OS autostart manager. The traits enable
//! substitution between the real console-backed implementations and mocks
//! for development and testing, and keep platform branching out of the
//! intake pipeline.
//!
//! # Design Philosophy
//!
//! - **Async-first**: I/O operations are asynchronous using native
//!   `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Best-effort feedback**: cue emission can fail (or be a no-op) without
//!   affecting event processing.
//! - **Capability interfaces**: the pipeline sees `ScanSource`, `Signaler`
//!   and `AutostartManager`; which implementation it gets is decided once at
//!   startup.
//!
//! # Scan Source
//!
//! ```no_run
//! use ponto_hardware::traits::ScanSource;
//! use ponto_hardware::console::StdinScanSource;
//!
//! # async fn example() -> ponto_hardware::Result<()> {
//! let mut source = StdinScanSource::new();
//! while let Some(line) = source.next_line().await? {
//!     println!("scanned: {line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Feedback
//!
//! ```no_run
//! use ponto_hardware::devices::AnySignaler;
//! use ponto_hardware::traits::{Cue, Signaler};
//!
//! # async fn example() {
//! let mut signaler = AnySignaler::detect();
//! signaler.signal(Cue::Short).await.ok();
//! # }
//! ```

pub mod autostart;
pub mod console;
pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types for convenience
pub use devices::{AnyAutostart, AnySignaler};
pub use error::{HardwareError, Result};
pub use traits::{AutostartManager, Cue, ScanSource, Signaler};
