use std::path::PathBuf;

/// Errors raised by the nickname normalization engine
#[derive(Debug)]
pub enum NicknameError {
    /// The two phrases given to a merge have a different number of characters
    LengthMismatch { expected: usize, got: usize },
    /// The persisted replacement table could not be read or parsed
    ConfigLoad { path: PathBuf, reason: String },
    /// The merged replacement table could not be written back
    ConfigWrite { path: PathBuf, reason: String },
    /// The remote fallback name list could not be fetched
    FallbackFetch(reqwest::Error),
    /// The fallback name list was fetched but contained no names
    EmptyFallbackPool,
}

impl std::fmt::Display for NicknameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NicknameError::LengthMismatch { .. } => {
                write!(f, "The lengths of the two provided phrases don't match.")
            }
            NicknameError::ConfigLoad { path, reason } => write!(
                f,
                "Could not open letter replacement file `{}` - `{}`.",
                path.display(),
                reason
            ),
            NicknameError::ConfigWrite { path, reason } => write!(
                f,
                "Could not open letter replacement file `{}` to write to it - `{}`.",
                path.display(),
                reason
            ),
            NicknameError::FallbackFetch(e) => write!(f, "Could not fetch fallback names - `{}`.", e),
            NicknameError::EmptyFallbackPool => write!(f, "The fallback name list is empty."),
        }
    }
}

impl std::error::Error for NicknameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NicknameError::FallbackFetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NicknameError {
    fn from(e: reqwest::Error) -> Self {
        NicknameError::FallbackFetch(e)
    }
}
