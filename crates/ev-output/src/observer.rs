//! `RunOutputObserver<W>` — bridges `RunObserver` to a `RunWriter`.

use ev_sim::{Checkpoint, RunObserver, SimulationRunState};

use crate::writer::RunWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that persists checkpoints and final results through
/// any [`RunWriter`].
///
/// Errors from the writer are stored internally because `RunObserver`
/// methods have no return value.  After `driver.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: RunWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: RunWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `driver.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RunWriter> RunObserver for RunOutputObserver<W> {
    fn on_halt(&mut self, checkpoint: &Checkpoint) {
        let result = self.writer.write_checkpoint(checkpoint);
        self.store_err(result);
    }

    fn on_run_end(&mut self, state: &SimulationRunState) {
        let result = self.writer.write_result(state);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
