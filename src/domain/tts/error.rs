use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("no text supplied")]
    EmptyInput,

    #[error("no audio produced: all {0} chunks failed")]
    NoAudioProduced(usize),

    #[error("dependency error: {0}")]
    Dependency(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::EmptyInput => {
                AppError::BadRequest("Text cannot be empty".to_string())
            }
            TtsServiceError::NoAudioProduced(total) => AppError::ExternalService(format!(
                "No audio produced: all {} chunks failed",
                total
            )),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
