//! Enum wrappers for runtime peripheral selection.
//!
//! The async peripheral traits are not object-safe (Edition 2024 RPITIT),
//! so dynamic selection goes through enum dispatch: one variant per
//! implementation, delegating through the trait with zero-cost
//! monomorphized calls.

use crate::{
    Result,
    autostart::{UnsupportedAutostart, XdgAutostart},
    console::{SilentSignaler, TerminalBell, bell_available},
    mock::MockSignaler,
    traits::{AutostartManager, Cue, Signaler},
};

/// Any feedback signaler, selected at startup.
#[derive(Debug)]
pub enum AnySignaler {
    /// Terminal bell (interactive console).
    Terminal(TerminalBell),

    /// Silent no-op (no sound device available).
    Silent(SilentSignaler),

    /// Recording mock (tests).
    Mock(MockSignaler),
}

impl AnySignaler {
    /// Pick the feedback implementation for this environment: the terminal
    /// bell when stdout is a terminal, the silent no-op otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if bell_available() {
            AnySignaler::Terminal(TerminalBell)
        } else {
            AnySignaler::Silent(SilentSignaler)
        }
    }

    /// A human-readable name for startup logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AnySignaler::Terminal(_) => "terminal-bell",
            AnySignaler::Silent(_) => "silent",
            AnySignaler::Mock(_) => "mock",
        }
    }
}

impl Signaler for AnySignaler {
    async fn signal(&mut self, cue: Cue) -> Result<()> {
        match self {
            AnySignaler::Terminal(s) => s.signal(cue).await,
            AnySignaler::Silent(s) => s.signal(cue).await,
            AnySignaler::Mock(s) => s.signal(cue).await,
        }
    }
}

/// Any autostart manager, selected per platform at startup.
#[derive(Debug)]
pub enum AnyAutostart {
    /// XDG autostart entry (Unix desktops).
    Xdg(XdgAutostart),

    /// Stub for platforms without a supported mechanism.
    Unsupported(UnsupportedAutostart),
}

impl AnyAutostart {
    /// Pick the autostart implementation for this platform.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(unix) {
            match XdgAutostart::new() {
                Ok(manager) => return AnyAutostart::Xdg(manager),
                Err(_) => return AnyAutostart::Unsupported(UnsupportedAutostart),
            }
        }
        AnyAutostart::Unsupported(UnsupportedAutostart)
    }
}

impl AutostartManager for AnyAutostart {
    fn install(&self) -> Result<()> {
        match self {
            AnyAutostart::Xdg(m) => m.install(),
            AnyAutostart::Unsupported(m) => m.install(),
        }
    }

    fn uninstall(&self) -> Result<()> {
        match self {
            AnyAutostart::Xdg(m) => m.uninstall(),
            AnyAutostart::Unsupported(m) => m.uninstall(),
        }
    }

    fn is_installed(&self) -> bool {
        match self {
            AnyAutostart::Xdg(m) => m.is_installed(),
            AnyAutostart::Unsupported(m) => m.is_installed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSignaler;

    #[tokio::test]
    async fn test_any_signaler_delegates() {
        let (mock, handle) = MockSignaler::new();
        let mut signaler = AnySignaler::Mock(mock);

        signaler.signal(Cue::Long).await.unwrap();
        assert_eq!(handle.cues(), vec![Cue::Long]);
        assert_eq!(signaler.name(), "mock");
    }

    #[test]
    fn test_detect_returns_a_signaler() {
        // Under a test harness stdout is piped, so detection lands on the
        // silent implementation.
        let signaler = AnySignaler::detect();
        assert!(matches!(
            signaler,
            AnySignaler::Terminal(_) | AnySignaler::Silent(_)
        ));
    }
}
