use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Phone(#[from] PhoneError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Compose(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // The business number comes from configuration, not the caller.
            AppError::Phone(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Schedule(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// A booking intent that cannot be turned into a complete message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("{kind} request requires an apartment")]
    MissingApartment { kind: &'static str },

    #[error("{kind} request is missing `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("unknown apartment: {0}")]
    UnknownApartment(String),

    #[error("check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidStay { check_in: String, check_out: String },

    #[error("a reservation needs at least one adult")]
    NoAdults,

    #[error("{guests} guests exceeds the limit of {max}")]
    TooManyGuests { guests: u64, max: u32 },

    #[error("a stay of {nights} nights exceeds the limit of {max}")]
    StayTooLong { nights: i64, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number is empty")]
    Empty,

    #[error("invalid phone number: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid schedule json: {0}")]
    Json(String),

    #[error("invalid weekday: {0}")]
    Weekday(String),

    #[error("invalid hours range: {0}")]
    Range(String),

    #[error("invalid time format: {0}")]
    Time(String),
}
