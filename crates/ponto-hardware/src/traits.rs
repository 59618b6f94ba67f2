//! Peripheral trait definitions.
//!
//! This module defines the trait interfaces between the intake pipeline and
//! the kiosk peripherals: the keyboard-emulating NFC reader (seen by the
//! process as a line-oriented input stream), the feedback signaler and the
//! autostart manager. The traits enable substitution between the real
//! console-backed implementations and mocks, so the pipeline never branches
//! on platform identity.
//!
//! All I/O traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use std::fmt;

/// Line-oriented scan input.
///
/// A keyboard-emulating NFC reader "types" the badge UID followed by Enter,
/// so the reader surface is simply the next line of input. The same stream
/// carries the operator's answers during inline registration.
///
/// # Object Safety and Dynamic Dispatch
///
/// This trait is NOT object-safe because `async fn` methods return
/// `impl Future` (Edition 2024 RPITIT). Use generic type parameters:
///
/// ```no_run
/// use ponto_hardware::traits::ScanSource;
/// use ponto_hardware::error::Result;
///
/// async fn drain<S: ScanSource>(source: &mut S) -> Result<usize> {
///     let mut count = 0;
///     while source.next_line().await?.is_some() {
///         count += 1;
///     }
///     Ok(count)
/// }
/// ```
pub trait ScanSource: Send {
    /// Read the next input line.
    ///
    /// Blocks asynchronously until a line arrives. Returns `Ok(None)` on
    /// end of input, which terminates the intake loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream fails (for example,
    /// non-UTF8 bytes on the console).
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// Feedback cue emitted after each delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Short cue: the event was accepted by the endpoint (status 200).
    Short,

    /// Long cue: transport failure or remote rejection.
    Long,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Short => write!(f, "short"),
            Cue::Long => write!(f, "long"),
        }
    }
}

/// Audible/visual feedback device.
///
/// Implementations must be best-effort: a kiosk without a sound device gets
/// the silent implementation, and cue failures never take down the intake
/// loop (callers discard the result with `.ok()`).
pub trait Signaler: Send {
    /// Emit a feedback cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device write fails.
    async fn signal(&mut self, cue: Cue) -> Result<()>;
}

/// OS startup registration.
///
/// Platform-specific implementations are selected at startup; platforms
/// without support get a stub whose operations fail with
/// [`HardwareError::Unsupported`](crate::HardwareError::Unsupported).
pub trait AutostartManager {
    /// Register the program to start with the user session.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is unsupported on this platform or
    /// the registration artifact cannot be written.
    fn install(&self) -> Result<()>;

    /// Remove the startup registration.
    ///
    /// # Errors
    ///
    /// Returns an error if removal is unsupported or fails. Removing a
    /// registration that does not exist is not an error.
    fn uninstall(&self) -> Result<()>;

    /// Check whether the startup registration is present.
    fn is_installed(&self) -> bool;
}
