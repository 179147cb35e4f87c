use glass_kernel::LandscapeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid goal json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("inline algorithm failed to compile: {message}")]
    InlineCompile { message: String },

    #[error("inline algorithms are not available (built without the `inline-rhai` feature)")]
    InlineUnavailable,

    #[error("unknown registered algorithm `{name}`")]
    UnknownAlgorithm { name: String },

    #[error("node descriptor {index}: {source}")]
    Descriptor {
        index: usize,
        #[source]
        source: Box<GoalError>,
    },

    #[error(transparent)]
    Placement(#[from] LandscapeError),
}
