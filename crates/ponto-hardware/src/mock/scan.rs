//! Mock scan source for testing without a reader.

use crate::{Result, traits::ScanSource};
use tokio::sync::mpsc;

/// Mock line-oriented scan source.
///
/// Lines pushed through the [`MockScanHandle`] are returned by
/// [`ScanSource::next_line`] in order; dropping the handle produces end of
/// input, exactly like the reader being unplugged and the console closed.
///
/// # Examples
///
/// ```
/// use ponto_hardware::mock::MockScanSource;
/// use ponto_hardware::traits::ScanSource;
///
/// #[tokio::main]
/// async fn main() -> ponto_hardware::Result<()> {
///     let (mut source, handle) = MockScanSource::new();
///
///     handle.push_line("1601873172").await;
///     drop(handle);
///
///     assert_eq!(source.next_line().await?, Some("1601873172".to_string()));
///     assert_eq!(source.next_line().await?, None);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockScanSource {
    line_rx: mpsc::Receiver<String>,
}

impl MockScanSource {
    /// Create a new mock scan source and its controlling handle.
    #[must_use]
    pub fn new() -> (Self, MockScanHandle) {
        let (line_tx, line_rx) = mpsc::channel(32);
        (Self { line_rx }, MockScanHandle { line_tx })
    }
}

impl ScanSource for MockScanSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        // Channel closed means end of input, not an error
        Ok(self.line_rx.recv().await)
    }
}

/// Handle for feeding lines into a [`MockScanSource`].
#[derive(Debug, Clone)]
pub struct MockScanHandle {
    line_tx: mpsc::Sender<String>,
}

impl MockScanHandle {
    /// Push one input line, as the reader would type it.
    ///
    /// Sends are silently dropped once the source is gone; tests that feed
    /// lines after the loop stopped should not fail on that.
    pub async fn push_line(&self, line: impl Into<String>) {
        let _ = self.line_tx.send(line.into()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_arrive_in_order() {
        let (mut source, handle) = MockScanSource::new();

        handle.push_line("1601873172").await;
        handle.push_line("abc").await;

        assert_eq!(
            source.next_line().await.unwrap(),
            Some("1601873172".to_string())
        );
        assert_eq!(source.next_line().await.unwrap(), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_dropping_handle_signals_eof() {
        let (mut source, handle) = MockScanSource::new();
        drop(handle);
        assert_eq!(source.next_line().await.unwrap(), None);
    }
}
