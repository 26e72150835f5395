use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

/// Failures surfaced to the form's caller. The `Display` text is the plain-text
/// response body; the source is only logged.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Erro ao decodificar JSON")]
    MalformedSubmission(#[source] serde_json::Error),

    #[error("Erro ao enviar mensagem para o Telegram")]
    Downstream(#[source] anyhow::Error),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MalformedSubmission(_) => StatusCode::BAD_REQUEST,
            RelayError::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::MalformedSubmission(e) => {
                warn!(error = %e, "Rejected malformed submission")
            }
            RelayError::Downstream(e) => warn!(error = %e, "Failed to relay submission"),
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
