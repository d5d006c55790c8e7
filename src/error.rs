use thiserror::Error;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset does not hold the required number of observations.
    #[error("invalid dataset size: expected {expected} observations, found {found}")]
    InvalidDatasetSize {
        /// Required number of observations.
        expected: usize,
        /// Number of observations supplied.
        found: usize,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Two points have different dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A cluster id does not refer to any centroid.
    #[error("cluster id {cluster} out of range for {n_clusters} centroids")]
    InvalidClusterId {
        /// Offending cluster id.
        cluster: usize,
        /// Number of centroids available.
        n_clusters: usize,
    },

    /// A range string is not of the form `<int>-<int>` with `min <= max`.
    #[error("malformed range {input:?}: {message}")]
    MalformedRange {
        /// The raw range text.
        input: String,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A plant table line does not have the expected shape.
    #[error("malformed plant record on line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// A sensor reading could not be parsed as a number.
    #[error("malformed reading on line {line}: {input:?}")]
    MalformedValue {
        /// 1-based line number.
        line: usize,
        /// The raw line.
        input: String,
    },

    /// An observation holds a NaN or infinite reading.
    #[error("non-finite {feature} reading in observation {index}")]
    NonFiniteReading {
        /// 0-based observation index.
        index: usize,
        /// Feature name.
        feature: &'static str,
    },

    /// A species appears more than once in the plant table.
    #[error("duplicate species {0:?}")]
    DuplicateSpecies(String),

    /// A species name was not found in the plant database.
    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    /// The plant database has no entries to match against.
    #[error("plant database is empty")]
    EmptyDatabase,

    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied data or parameters the core cannot accept.
    InvalidInput,
    /// There are no species to match against.
    EmptyDatabase,
    /// File access failed.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDatabase => ErrorKind::EmptyDatabase,
            Error::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::InvalidInput`.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
