#[derive(thiserror::Error, Debug)]
pub enum NoteseekError {
    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("malformed snapshot: {0}")]
    Snapshot(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}
