mod output;

use cpal::{
    BuildStreamError, DefaultStreamConfigError, PauseStreamError, PlayStreamError, SampleFormat,
    SupportedStreamConfigsError,
};
pub use output::*;

pub use cpal;

use crate::RainError;

/// An error encountered while opening or controlling a [`RainOutput`]
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// An error building the rain itself
    #[error("{0}")]
    Rain(#[from] RainError),
    /// No output device is available
    #[error("no output device available")]
    NoDevice,
    /// An error querying the device's stream configurations
    #[error("unable to query output device configurations: {0}")]
    SupportedConfigs(#[from] SupportedStreamConfigsError),
    /// An error getting the device's default stream configuration
    #[error("unable to get default output configuration: {0}")]
    DefaultConfig(#[from] DefaultStreamConfigError),
    /// The device only offers a sample format that rain cannot be rendered to
    #[error("unsupported output sample format {0:?}")]
    UnsupportedSampleFormat(SampleFormat),
    /// An error opening the output stream
    #[error("unable to open output stream: {0}")]
    StreamOpen(#[from] BuildStreamError),
    /// An error starting the output stream
    #[error("unable to start output stream: {0}")]
    StreamStart(#[from] PlayStreamError),
    /// An error stopping the output stream
    #[error("unable to stop output stream: {0}")]
    StreamStop(#[from] PauseStreamError),
}

/// A result type for opening or controlling a [`RainOutput`]
pub type OutputResult<T> = Result<T, OutputError>;
