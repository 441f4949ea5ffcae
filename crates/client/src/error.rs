use std::path::PathBuf;

use storefront_products::SubmitBlocked;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// No session; the caller should redirect to the login view.
    #[error("not logged in")]
    Unauthenticated,

    /// The form refused to start a submission (invalid fields or one in flight).
    #[error(transparent)]
    Blocked(#[from] SubmitBlocked),

    #[error("could not read picture {path:?}: {source}")]
    ReadPicture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    ServerRejected { status: u16, message: String },
}

impl SubmissionError {
    /// Failures of an attempted send, reported as an error notification.
    /// The others never left the form.
    pub fn is_send_failure(&self) -> bool {
        matches!(
            self,
            SubmissionError::ReadPicture { .. }
                | SubmissionError::Network(_)
                | SubmissionError::ServerRejected { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected login response: {0}")]
    InvalidResponse(String),
}
