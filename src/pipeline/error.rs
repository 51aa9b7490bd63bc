use thiserror::Error;

use crate::ascii::{ConvertError, SettingsError};

/// Terminal failure of one pipeline request.
///
/// A superseded request is not an error; see [`super::RunOutcome::Cancelled`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("frame sequence is empty")]
    EmptySequence,

    #[error("invalid conversion settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("frame {index} failed to convert: {source}")]
    Frame {
        index: usize,
        #[source]
        source: ConvertError,
    },
}
