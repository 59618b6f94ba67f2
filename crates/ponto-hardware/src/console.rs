//! Console-backed peripheral implementations.
//!
//! The keyboard-emulating NFC reader is presented by the OS as ordinary
//! keyboard input, so the real scan source is stdin. The real feedback
//! signaler is the terminal bell, with a silent no-op for environments
//! without a terminal.

use crate::{
    Result,
    traits::{Cue, ScanSource, Signaler},
};
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// Scan source reading badge UIDs from stdin, one per line.
#[derive(Debug)]
pub struct StdinScanSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinScanSource {
    /// Create a scan source over the process stdin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinScanSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSource for StdinScanSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// Feedback via the terminal bell.
///
/// One bell for a short cue, two for a long one, matching what operators of
/// earlier deployments are used to. Whether the bell actually sounds depends
/// on the terminal; the write itself is the contract.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Signaler for TerminalBell {
    async fn signal(&mut self, cue: Cue) -> Result<()> {
        let bytes: &[u8] = match cue {
            Cue::Short => b"\x07",
            Cue::Long => b"\x07\x07",
        };
        let mut stdout = tokio::io::stdout();
        stdout.write_all(bytes).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// No-op feedback for environments without a sound device.
#[derive(Debug, Default)]
pub struct SilentSignaler;

impl Signaler for SilentSignaler {
    async fn signal(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }
}

/// Whether the terminal bell is worth attempting.
///
/// Redirected or piped stdout has no bell; unattended services fall back to
/// the silent signaler.
#[must_use]
pub fn bell_available() -> bool {
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_silent_signaler_accepts_both_cues() {
        let mut signaler = SilentSignaler;
        signaler.signal(Cue::Short).await.unwrap();
        signaler.signal(Cue::Long).await.unwrap();
    }

    #[tokio::test]
    async fn test_terminal_bell_writes_without_error() {
        // Under the test harness stdout is a pipe; the write must still
        // succeed even though nothing audible happens.
        let mut signaler = TerminalBell;
        signaler.signal(Cue::Short).await.unwrap();
        signaler.signal(Cue::Long).await.unwrap();
    }
}
