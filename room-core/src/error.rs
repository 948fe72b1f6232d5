use std::fmt;

/// Every fallible core operation reports one of these kinds. None of them is
/// fatal: the caller retries with corrected input and the layout is never
/// left partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    UnknownItemType(String),
    InvalidRotation(u32),
    InvalidSeed,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::UnknownItemType(kind) => {
                write!(f, "unknown furniture type '{kind}'")
            }
            EditorError::InvalidRotation(deg) => {
                write!(f, "rotation must be one of 0/90/180/270, got {deg}")
            }
            EditorError::InvalidSeed => write!(f, "invalid seed"),
        }
    }
}

impl std::error::Error for EditorError {}
