//! Color parsing errors

/// Errors from normalizing a color string to an RGB triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("unable to parse color format: '{0}'")]
    Unrecognized(String),

    #[error("{channel} channel out of range: {value}")]
    ChannelOutOfRange { channel: &'static str, value: String },
}
