use thiserror::Error;

pub type Result<T, E = SessionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No languages registered")]
    EmptyRegistry,

    #[error("Language {0} not found")]
    UnknownLanguage(String),

    #[error("Analysis failed for {language}: {source}")]
    AnalyzeFailed {
        language: String,
        source: anyhow::Error,
    },
}
