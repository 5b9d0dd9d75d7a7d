//! Error types for the page, speech, and form-filling seams.

use thiserror::Error;

/// Browser page errors.
#[derive(Debug, Error)]
pub enum PageError {
    /// Element could not be located on the page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A DOM action (fill, check, select, click, set-files) failed.
    #[error("Action failed: {0}")]
    ActionFailed(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The page or browser session is gone.
    #[error("Session closed")]
    SessionClosed,

    /// A page operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Backend-specific failure (CDP, transport, ...).
    #[error("Page backend error: {0}")]
    Backend(String),
}

/// Speech engine errors.
///
/// Recognition misses and service outages are distinct: the first is
/// recovered by re-prompting, the second by treating the capture as empty.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Audio was captured but not understood.
    #[error("Speech not recognized")]
    Unrecognized,

    /// The recognition service is unreachable or rejected the request.
    #[error("Speech service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Backend-specific failure.
    #[error("Speech backend error: {0}")]
    Backend(String),
}

/// Form-filling errors surfaced by the interaction engine.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_display() {
        let err = PageError::ElementNotFound("#email".to_string());
        assert!(err.to_string().contains("Element not found"));
        assert!(err.to_string().contains("#email"));
    }

    #[test]
    fn test_speech_error_display() {
        let err = SpeechError::ServiceUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_form_error_from_page() {
        let err: FormError = PageError::SessionClosed.into();
        assert!(matches!(err, FormError::Page(PageError::SessionClosed)));
    }

    #[test]
    fn test_form_error_from_speech() {
        let err: FormError = SpeechError::Unrecognized.into();
        assert!(matches!(err, FormError::Speech(SpeechError::Unrecognized)));
    }
}
