use {
    crate::index::DocId,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::{Error as IoError, ErrorKind as IoErrorKind},
    },
};

/// Errors that can occur while evaluating function queries.
#[derive(Debug)]
pub enum FunctionError {
    /// A sort field built from a value source was used for comparisons before it was weighted.
    UnweightedSortField(String /* description */),

    /// A sub-query cursor or the segment failed while computing the value for a document.
    Evaluation {
        /// Description of the query or value source whose evaluation failed.
        description: String,

        /// The segment-local document being evaluated.
        doc: DocId,

        /// The underlying failure.
        source: IoError,
    },

    /// An I/O error from the reader outside of a sub-query evaluation.
    Io(IoError),

    /// A call-order contract was violated.
    IllegalState(String /* message */),

    /// An argument was invalid.
    InvalidArgument(String /* message */),
}

impl FunctionError {
    /// Wraps an I/O error raised while evaluating `description` at `doc`.
    pub fn evaluation(description: impl Into<String>, doc: DocId, source: IoError) -> Self {
        Self::Evaluation {
            description: description.into(),
            doc,
            source,
        }
    }
}

impl Display for FunctionError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::UnweightedSortField(description) => write!(f, "Unweighted use of sort {description}"),
            Self::Evaluation {
                description,
                doc,
                source,
            } => write!(f, "Error evaluating {description} at doc={doc}: {source}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::IllegalState(message) => write!(f, "Illegal state: {message}"),
            Self::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),
        }
    }
}

impl Error for FunctionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Evaluation {
                source,
                ..
            } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for FunctionError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

impl From<FunctionError> for IoError {
    fn from(e: FunctionError) -> Self {
        match e {
            FunctionError::Io(e) => e,
            e => IoError::new(IoErrorKind::Other, e),
        }
    }
}

/// A type alias for a `Result` with a [FunctionError].
pub type FunctionResult<T> = Result<T, FunctionError>;
