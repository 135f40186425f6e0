use thiserror::Error;

use ev_core::CoreError;

/// Errors that prevent a driver from being built.
///
/// Once running, failures end the run with [`RunStatus::Halted`] instead.
///
/// [`RunStatus::Halted`]: crate::RunStatus::Halted
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
