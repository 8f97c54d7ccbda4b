use reqwest::StatusCode;
use thiserror::Error;

/// Response bodies longer than this are cut before they reach an error message.
const BODY_SNIPPET_BYTES: usize = 500;

/// Failures of a single backend request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired, sign in again")]
    SessionExpired,

    #[error("Not allowed to read {path}")]
    Forbidden { path: String },

    #[error("No such resource: {path}")]
    Missing { path: String },

    #[error("Backend returned {status} for {path}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("Could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn from_response(path: &str, status: StatusCode, body: &str) -> Self {
        let path = path.to_string();
        match status {
            StatusCode::UNAUTHORIZED => ApiError::SessionExpired,
            StatusCode::FORBIDDEN => ApiError::Forbidden { path },
            StatusCode::NOT_FOUND => ApiError::Missing { path },
            _ => ApiError::Status {
                path,
                status,
                body: snippet(body),
            },
        }
    }

    /// Throttling, server faults and transport failures may succeed on a
    /// later call; the cache simply fetches again next time.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            ApiError::Transport(_) => true,
            _ => false,
        }
    }
}

fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.len() <= BODY_SNIPPET_BYTES {
        return body.to_string();
    }
    let mut cut = BODY_SNIPPET_BYTES;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} bytes)", &body[..cut], body.len())
}
