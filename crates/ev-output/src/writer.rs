//! The `RunWriter` trait implemented by all output backends.

use ev_sim::{Checkpoint, SimulationRunState};

use crate::OutputResult;

/// Trait implemented by the JSON and CSV writers.
///
/// Errors are stored by [`RunOutputObserver`](crate::RunOutputObserver) and
/// retrieved with `take_error`.
pub trait RunWriter {
    /// Persist the crash checkpoint of a halted run.
    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> OutputResult<()>;

    /// Persist the final state of a run, completed or halted.
    fn write_result(&mut self, state: &SimulationRunState) -> OutputResult<()>;

    /// Flush everything.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Both writers receive every call; the first error wins but the second
/// writer still runs.
impl<A: RunWriter, B: RunWriter> RunWriter for (A, B) {
    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> OutputResult<()> {
        let first = self.0.write_checkpoint(checkpoint);
        let second = self.1.write_checkpoint(checkpoint);
        first.and(second)
    }

    fn write_result(&mut self, state: &SimulationRunState) -> OutputResult<()> {
        let first = self.0.write_result(state);
        let second = self.1.write_result(state);
        first.and(second)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let first = self.0.finish();
        let second = self.1.finish();
        first.and(second)
    }
}
