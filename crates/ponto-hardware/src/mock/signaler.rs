//! Mock feedback signaler that records emitted cues.

use crate::{
    Result,
    traits::{Cue, Signaler},
};
use std::sync::{Arc, Mutex};

/// Mock signaler recording every cue for later assertions.
#[derive(Debug)]
pub struct MockSignaler {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl MockSignaler {
    /// Create a new mock signaler and its observing handle.
    #[must_use]
    pub fn new() -> (Self, MockSignalerHandle) {
        let cues = Arc::new(Mutex::new(Vec::new()));
        (
            Self { cues: cues.clone() },
            MockSignalerHandle { cues },
        )
    }
}

impl Signaler for MockSignaler {
    async fn signal(&mut self, cue: Cue) -> Result<()> {
        self.cues.lock().expect("cue log poisoned").push(cue);
        Ok(())
    }
}

/// Handle for inspecting the cues a [`MockSignaler`] emitted.
#[derive(Debug, Clone)]
pub struct MockSignalerHandle {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl MockSignalerHandle {
    /// Snapshot of the cues emitted so far, in order.
    #[must_use]
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().expect("cue log poisoned").clone()
    }
}
