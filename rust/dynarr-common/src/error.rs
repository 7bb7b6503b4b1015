use thiserror::Error;

/// Error reported by the checked operations of the containers.
///
/// The kind is boxed so that `Result<&T>` stays pointer-sized on the
/// success path of hot accessors such as `at()`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if the error reports a position or state outside the
    /// container's current bounds. Every error produced by the containers
    /// is of this category.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::IndexOutOfRange { .. }
                | ErrorKind::RangeOutOfRange { .. }
                | ErrorKind::Empty { .. }
        )
    }

    pub fn index_out_of_range(operation: &'static str, index: usize, len: usize) -> Error {
        Error(
            ErrorKind::IndexOutOfRange {
                operation,
                index,
                len,
            }
            .into(),
        )
    }

    pub fn range_out_of_range(
        operation: &'static str,
        start: usize,
        end: usize,
        len: usize,
    ) -> Error {
        Error(
            ErrorKind::RangeOutOfRange {
                operation,
                start,
                end,
                len,
            }
            .into(),
        )
    }

    pub fn empty(operation: &'static str) -> Error {
        Error(ErrorKind::Empty { operation }.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("{operation}: index {index} is out of range for length {len}")]
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{operation}: range {start}..{end} is out of range for length {len}")]
    RangeOutOfRange {
        operation: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("{operation}: container is empty")]
    Empty { operation: &'static str },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
