use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "catalog JSON must be an array, an object with a 'records'/'data' array, or an object of section arrays"
    )]
    InvalidLayout,

    #[error("invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("record at index {index} has no header")]
    MissingHeader { index: usize },

    #[error("failed to process CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("scenario sheet {path} has no header row")]
    SheetNotFound { path: PathBuf },

    #[error("scenario '{name}' not found")]
    ScenarioNotFound { name: String },

    #[error("text generator failed: {message}")]
    Generator { message: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
