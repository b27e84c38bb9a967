use thiserror::Error;

/// Errors raised while decoding a segmented message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("message is empty")]
    Empty,
    #[error("message must start with an MSH segment, found {found:?}")]
    MissingHeader { found: String },
    #[error("MSH segment too short to read the field separator and encoding characters")]
    HeaderTooShort,
    #[error("invalid segment name {name:?} on line {line}")]
    InvalidSegmentName { line: usize, name: String },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
