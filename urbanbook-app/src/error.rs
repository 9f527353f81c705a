use thiserror::Error;

/// Failures talking to the UrbanBook backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(
        "Server returned non-JSON response (status {status}, content type \
         {content_type:?}). Backend might be misconfigured."
    )]
    NotJson {
        status: u16,
        content_type: Option<String>,
    },

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The identity SDK returned no data.
    #[error("{0}")]
    Identity(String),

    #[error("No token received from authentication service")]
    MissingToken,

    /// The backend answered but refused the token.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("User ID is missing")]
    MissingUserId,

    #[error("age must be a whole number, got {0:?}")]
    InvalidAge(String),

    #[error("experience years must be a whole number, got {0:?}")]
    InvalidExperience(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
