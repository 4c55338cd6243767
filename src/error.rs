use thiserror::Error;

/// Everything that can go wrong between a trigger and the pasted translation.
///
/// The `Display` text is what the user sees in the status line, so it is
/// phrased for people rather than for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("API key not set. Please set it in settings.")]
    MissingCredential,

    #[error("No text selected or cannot access clipboard")]
    EmptySelection,

    #[error("Text too long ({len} characters). Please select less than {max} characters.")]
    InputTooLong { len: usize, max: usize },

    #[error("Translation timeout. Please check your internet connection.")]
    Timeout,

    #[error("Invalid API key. Please check your OpenAI API key.")]
    Unauthorized,

    #[error("Invalid response from translation service")]
    MalformedResponse,

    #[error("Translation failed: {0}")]
    NetworkFailure(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Key simulation failed: {0}")]
    Input(String),

    // Logged only, never shown.
    #[error("Clipboard restore failed: {0}")]
    ClipboardRestoreFailure(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslateError::Timeout
        } else if error.is_decode() {
            TranslateError::MalformedResponse
        } else {
            TranslateError::NetworkFailure(error.to_string())
        }
    }
}
