//! Error types.

/// A capacity limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitExceeded {
    /// Name of the resource that ran out of space.
    pub name: &'static str,

    /// Maximum size, in bytes.
    pub limit: u64,

    /// Requested size, in bytes.
    pub requested: u64,
}

impl std::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            name,
            limit,
            requested,
        } = self;

        write!(f, "{name}: got={requested}, limit={limit}")
    }
}

impl std::error::Error for LimitExceeded {}

impl From<LimitExceeded> for std::io::Error {
    fn from(e: LimitExceeded) -> Self {
        Self::new(std::io::ErrorKind::QuotaExceeded, e)
    }
}

/// Failure of a bounded copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyError {
    /// The input does not fit into the destination, terminator included.
    InputTooLarge(LimitExceeded),

    /// The input contains a NUL byte, which would cut the stored string short.
    InteriorNul {
        /// Byte offset of the first NUL.
        position: usize,
    },
}

impl std::fmt::Display for CopyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputTooLarge(e) => write!(f, "input too large: {e}"),
            Self::InteriorNul { position } => {
                write!(f, "input contains NUL byte at position {position}")
            }
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputTooLarge(e) => Some(e),
            Self::InteriorNul { .. } => None,
        }
    }
}

impl From<LimitExceeded> for CopyError {
    fn from(e: LimitExceeded) -> Self {
        Self::InputTooLarge(e)
    }
}

impl From<CopyError> for std::io::Error {
    fn from(e: CopyError) -> Self {
        match e {
            CopyError::InputTooLarge(e) => e.into(),
            CopyError::InteriorNul { .. } => Self::new(std::io::ErrorKind::InvalidInput, e),
        }
    }
}
