use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use uuid::Uuid;

use crate::domain::{EmailParseError, WaitlistEmail};
use crate::store::{StoreError, WaitlistStore};
use crate::utils::error_chain_fmt;

/// User-facing copy returned by the API, shared with the landing page
pub const MSG_JOINED: &str = "成功加入等待列表！";
pub const MSG_INVALID_BODY: &str = "请输入有效的邮箱地址";
pub const MSG_INVALID_FORMAT: &str = "邮箱格式不正确";
pub const MSG_DUPLICATE_EMAIL: &str = "该邮箱已经在等待列表中了";
pub const MSG_SIGNUP_UNAVAILABLE: &str = "服务器错误，请稍后再试";
pub const MSG_COUNT_UNAVAILABLE: &str = "获取数据失败";

/// Signup data
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SignupData {
    pub email: String,
}

/// Body of a successful signup response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// Body of a successful count response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Body of every error response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Signup error type
#[derive(thiserror::Error)]
pub enum SignupError {
    #[error("{}", MSG_INVALID_BODY)]
    MissingEmail,
    #[error("{}", MSG_INVALID_FORMAT)]
    InvalidFormat(#[from] EmailParseError),
    #[error("{}", MSG_DUPLICATE_EMAIL)]
    DuplicateEmail,
    #[error("{}", MSG_SIGNUP_UNAVAILABLE)]
    StorageUnavailable(#[source] StoreError),
}

impl From<StoreError> for SignupError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => Self::DuplicateEmail,
            e => Self::StorageUnavailable(e),
        }
    }
}

impl fmt::Debug for SignupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignupError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingEmail | Self::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Count error type
#[derive(thiserror::Error)]
pub enum CountError {
    #[error("{}", MSG_COUNT_UNAVAILABLE)]
    StorageUnavailable(#[from] StoreError),
}

impl fmt::Debug for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CountError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Waitlist signup handler
#[tracing::instrument(
    name = "Adding an email to the waitlist",
    skip(data, store),
    fields(signup_email = %data.email)
)]
pub async fn join_waitlist(
    data: web::Json<SignupData>,
    store: web::Data<dyn WaitlistStore>,
) -> Result<HttpResponse, SignupError> {
    if data.email.is_empty() {
        return Err(SignupError::MissingEmail);
    }
    let email = WaitlistEmail::parse(data.0.email)?;

    // Fast path for the common duplicate case; the store's uniqueness
    // constraint stays authoritative for concurrent submissions
    if store.find_by_email(&email).await?.is_some() {
        return Err(SignupError::DuplicateEmail);
    }

    let entry = store.insert(&email).await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        success: true,
        message: MSG_JOINED.into(),
        id: entry.id,
    }))
}

/// Waitlist count handler
#[tracing::instrument(name = "Fetching the waitlist count", skip(store))]
pub async fn waitlist_count(
    store: web::Data<dyn WaitlistStore>,
) -> Result<HttpResponse, CountError> {
    let count = store.count().await?;

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}
