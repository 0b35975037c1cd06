use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid delimiter {0:?}, expected a single space or a comma")]
    InvalidDelimiter(String),

    #[error("target index {index} is out of range for {attributes} attributes")]
    TargetIndexOutOfRange { index: usize, attributes: usize },

    #[error("{0} has no header line")]
    MissingHeader(PathBuf),

    #[error("no training rows left after cleaning")]
    EmptyTrainingSet,

    #[error("test header has {found} columns but the model was trained on {expected}")]
    HeaderMismatch { expected: usize, found: usize },

    #[error("train() must succeed before classify()")]
    NotTrained,

    #[error("classify() must succeed before evaluate()")]
    NotClassified,

    #[error("unable to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
