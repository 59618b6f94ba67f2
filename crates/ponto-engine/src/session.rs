//! Intake-loop state machine and the session driver.
//!
//! # States
//!
//! - `AwaitingLine`: blocked on the next input line
//! - `Validating`: running the line through the debouncer
//! - `Resolving`: roster lookup (possibly inline registration)
//! - `Classifying`: theory-day classification for the event's date
//! - `Delivering`: outbound POST and feedback cue
//! - `Stopped`: terminal, reached on end-of-input or interrupt
//!
//! # Valid Transitions
//!
//! - AwaitingLine → Validating → (AwaitingLine on reject | Resolving)
//! - Resolving → Classifying → Delivering → AwaitingLine
//! - AwaitingLine → Stopped
//!
//! Processing is strictly sequential per event: the next line is not read
//! until the current event's delivery and feedback have completed.

use std::fmt;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use ponto_config::ConfigStore;
use ponto_core::{Error, OperatingMode, Result};
use ponto_delivery::AttendanceClient;
use ponto_hardware::{Cue, ScanSource, Signaler};

use crate::classifier::DayClassifier;
use crate::debounce::{ScanDebouncer, ScanOutcome};
use crate::roster::RosterResolver;

/// Represents all phases of the intake loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Blocked on the next input line.
    AwaitingLine,

    /// Running the raw line through format validation and debounce.
    Validating,

    /// Resolving the badge against the roster.
    Resolving,

    /// Computing the theory-day classification.
    Classifying,

    /// Performing the outbound call and feedback.
    Delivering,

    /// Terminal state: end-of-input or interrupt.
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            SessionState::AwaitingLine => "AwaitingLine",
            SessionState::Validating => "Validating",
            SessionState::Resolving => "Resolving",
            SessionState::Classifying => "Classifying",
            SessionState::Delivering => "Delivering",
            SessionState::Stopped => "Stopped",
        };
        write!(f, "{}", state_str)
    }
}

impl SessionState {
    /// Check if transition to target state is valid from this state.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            // From AwaitingLine
            (SessionState::AwaitingLine, SessionState::Validating | SessionState::Stopped)
            // From Validating: back on reject, forward on accept
            | (SessionState::Validating, SessionState::AwaitingLine | SessionState::Resolving)
            // From Resolving
            | (SessionState::Resolving, SessionState::Classifying)
            // From Classifying
            | (SessionState::Classifying, SessionState::Delivering)
            // From Delivering
            | (SessionState::Delivering, SessionState::AwaitingLine)
        )
    }

    /// Returns `true` for the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Stopped)
    }
}

/// State machine enforcing the intake-loop phase order.
#[derive(Debug)]
pub struct SessionStateMachine {
    current: SessionState,
}

impl SessionStateMachine {
    /// Create a machine in the `AwaitingLine` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: SessionState::AwaitingLine,
        }
    }

    /// The current state.
    #[must_use]
    pub fn current_state(&self) -> &SessionState {
        &self.current
    }

    /// Transition to a new state, validating the transition.
    ///
    /// # Errors
    /// Returns `Error::InvalidStateTransition` if the requested transition
    /// is not valid for the current state.
    pub fn transition_to(&mut self, new_state: SessionState) -> Result<()> {
        if !self.current.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current.to_string(),
                to: new_state.to_string(),
            });
        }
        self.current = new_state;
        Ok(())
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// The intake session: one sequential flow of control from input line to
/// feedback cue.
pub struct Session<S: ScanSource, F: Signaler> {
    store: ConfigStore,
    source: S,
    signaler: F,
    client: AttendanceClient,
    resolver: RosterResolver,
    debouncer: ScanDebouncer,
    classifier: DayClassifier,
    machine: SessionStateMachine,
    last_seen_date: NaiveDate,
}

impl<S: ScanSource, F: Signaler> Session<S, F> {
    /// Wire up a session over the given peripherals and configuration.
    pub fn new(
        store: ConfigStore,
        source: S,
        signaler: F,
        client: AttendanceClient,
        mode: OperatingMode,
    ) -> Self {
        let debouncer = ScanDebouncer::new(store.config().debounce_interval());
        Self {
            store,
            source,
            signaler,
            client,
            resolver: RosterResolver::new(mode),
            debouncer,
            classifier: DayClassifier::new(),
            machine: SessionStateMachine::new(),
            last_seen_date: Local::now().date_naive(),
        }
    }

    /// Run the intake loop until end-of-input or interrupt.
    ///
    /// No per-event error is fatal: format rejections, transport failures,
    /// remote rejections and persistence failures all leave the loop ready
    /// for the next line.
    ///
    /// # Errors
    /// Returns an error only on an internal state-machine violation, which
    /// indicates a bug rather than an operational condition.
    pub async fn run(mut self) -> Result<()> {
        let today = Local::now().date_naive();
        let classification = self.classifier.classification_for(today, self.store.config());
        info!(
            endpoint = %self.client.endpoint(),
            is_theory_day = classification.is_theory_day,
            debounce_ms = self.debouncer.interval().as_millis() as u64,
            "session_started"
        );

        loop {
            let next = tokio::select! {
                line = self.source.next_line() => line,
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt_received");
                    break;
                }
            };

            let line = match next {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("end_of_input");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "scan_source_failed");
                    break;
                }
            };

            self.machine.transition_to(SessionState::Validating)?;

            let event = match self.debouncer.accept(&line, Instant::now()) {
                ScanOutcome::Rejected(_) => {
                    // Already debug-logged by the debouncer; just move on
                    self.machine.transition_to(SessionState::AwaitingLine)?;
                    continue;
                }
                ScanOutcome::Accepted(event) => event,
            };

            // Pick up roster and calendar edits made externally: reload the
            // whole configuration once per date change.
            let event_date = event.received_at.date_naive();
            if event_date != self.last_seen_date {
                self.store.reload();
                self.debouncer
                    .set_interval(self.store.config().debounce_interval());
                self.classifier.invalidate();
                self.last_seen_date = event_date;
                info!(date = %event_date, "date_advanced_config_reloaded");
            }

            self.machine.transition_to(SessionState::Resolving)?;
            let resolution = self
                .resolver
                .resolve(&mut self.store, &event.badge, &mut self.source)
                .await;

            self.machine.transition_to(SessionState::Classifying)?;
            let classification = self
                .classifier
                .classification_for(event_date, self.store.config());

            info!(
                badge = %event.badge,
                name = %resolution.display_name,
                is_theory_day = classification.is_theory_day,
                "scan_accepted"
            );

            self.machine.transition_to(SessionState::Delivering)?;
            let result = self
                .client
                .deliver(
                    &event.badge,
                    &resolution.display_name,
                    classification.is_theory_day,
                )
                .await;

            let cue = if result.is_success() {
                info!(status = 200, body = %result.body, "delivery_accepted");
                Cue::Short
            } else {
                match result.status {
                    Some(status) => {
                        error!(status = status, body = %result.body, "delivery_rejected");
                    }
                    None => {
                        let message = result.error.as_deref().unwrap_or("unknown error");
                        error!(error = %message, "delivery_failed");
                    }
                }
                Cue::Long
            };

            // Feedback is best-effort; a mute kiosk still processes scans
            self.signaler.signal(cue).await.ok();

            self.machine.transition_to(SessionState::AwaitingLine)?;
        }

        self.machine.transition_to(SessionState::Stopped)?;
        info!("session_stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_machine_starts_awaiting() {
        let machine = SessionStateMachine::new();
        assert_eq!(machine.current_state(), &SessionState::AwaitingLine);
        assert!(!machine.current_state().is_terminal());
    }

    #[test]
    fn test_complete_event_flow() {
        let mut machine = SessionStateMachine::new();
        machine.transition_to(SessionState::Validating).unwrap();
        machine.transition_to(SessionState::Resolving).unwrap();
        machine.transition_to(SessionState::Classifying).unwrap();
        machine.transition_to(SessionState::Delivering).unwrap();
        machine.transition_to(SessionState::AwaitingLine).unwrap();
        assert_eq!(machine.current_state(), &SessionState::AwaitingLine);
    }

    #[test]
    fn test_rejected_scan_returns_to_awaiting() {
        let mut machine = SessionStateMachine::new();
        machine.transition_to(SessionState::Validating).unwrap();
        machine.transition_to(SessionState::AwaitingLine).unwrap();
        assert_eq!(machine.current_state(), &SessionState::AwaitingLine);
    }

    #[test]
    fn test_stop_from_awaiting() {
        let mut machine = SessionStateMachine::new();
        machine.transition_to(SessionState::Stopped).unwrap();
        assert!(machine.current_state().is_terminal());
    }

    #[test]
    fn test_invalid_transition_awaiting_to_delivering() {
        let mut machine = SessionStateMachine::new();
        let result = machine.transition_to(SessionState::Delivering);
        assert!(result.is_err());
        assert_eq!(machine.current_state(), &SessionState::AwaitingLine);
    }

    #[test]
    fn test_invalid_transition_validating_to_classifying() {
        let mut machine = SessionStateMachine::new();
        machine.transition_to(SessionState::Validating).unwrap();
        assert!(machine.transition_to(SessionState::Classifying).is_err());
    }

    #[test]
    fn test_invalid_transition_out_of_stopped() {
        let mut machine = SessionStateMachine::new();
        machine.transition_to(SessionState::Stopped).unwrap();
        assert!(machine.transition_to(SessionState::Validating).is_err());
        assert!(machine.transition_to(SessionState::AwaitingLine).is_err());
    }

    #[test]
    fn test_can_transition_to_table() {
        use SessionState::*;
        assert!(AwaitingLine.can_transition_to(&Validating));
        assert!(AwaitingLine.can_transition_to(&Stopped));
        assert!(!AwaitingLine.can_transition_to(&Resolving));

        assert!(Validating.can_transition_to(&AwaitingLine));
        assert!(Validating.can_transition_to(&Resolving));
        assert!(!Validating.can_transition_to(&Delivering));

        assert!(Resolving.can_transition_to(&Classifying));
        assert!(!Resolving.can_transition_to(&AwaitingLine));

        assert!(Classifying.can_transition_to(&Delivering));
        assert!(Delivering.can_transition_to(&AwaitingLine));
        assert!(!Delivering.can_transition_to(&Stopped));

        assert!(!Stopped.can_transition_to(&AwaitingLine));
    }

    #[test]
    fn test_state_display_formatting() {
        assert_eq!(SessionState::AwaitingLine.to_string(), "AwaitingLine");
        assert_eq!(SessionState::Validating.to_string(), "Validating");
        assert_eq!(SessionState::Stopped.to_string(), "Stopped");
    }
}
