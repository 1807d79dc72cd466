use std::path::PathBuf;

/// Errors raised while loading a model or evaluating a test set.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    /// A file could not be opened
    #[error("couldn't open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read failed partway through a stream
    #[error(transparent)]
    Read(#[from] std::io::Error),

    /// A token that should have been a number wasn't
    #[error("line {line}: can't parse {kind} from {token:?}")]
    Parse {
        kind: &'static str,
        line: usize,
        token: String,
    },

    /// Scorer precondition: one coefficient per feature plus the intercept
    #[error("dimension mismatch: {coefficients} coefficients for {features} features")]
    DimensionMismatch { coefficients: usize, features: usize },

    #[error("line {line}: expected {expected} features, found {actual}")]
    RowWidth {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("class {class} has {actual} coefficients, expected {expected}")]
    RaggedModel {
        class: usize,
        expected: usize,
        actual: usize,
    },

    #[error("test set has no rows, accuracy is undefined")]
    EmptyTestSet,

    #[error("model has no classes")]
    EmptyModel,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EvalError>;

impl EvalError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> EvalError {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }
}
