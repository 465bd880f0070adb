/// Why a `put` was rejected. Both cases are invalid arguments: the call
/// must change before it can succeed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// No key was given.
    NullKey,

    /// The key is already present; `put` never overwrites.
    DuplicateKey,
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullKey => f.write_str("cannot put a null key"),
            Self::DuplicateKey => f.write_str("key already exists"),
        }
    }
}

impl std::error::Error for InsertError {}

/// Errors returned by `ProbeMap` operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Rejected insert
    InvalidArgument(InsertError),

    /// Lookup or removal of a key that is not in the map
    KeyNotFound,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Self::KeyNotFound => f.write_str("key does not exist"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::KeyNotFound => None,
        }
    }
}

impl From<InsertError> for Error {
    fn from(value: InsertError) -> Self {
        Self::InvalidArgument(value)
    }
}

/// Map result
pub type Result<T> = std::result::Result<T, Error>;
