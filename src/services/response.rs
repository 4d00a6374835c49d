use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
	comment::Comment,
	post::{
		entity::{Post, Reaction},
		PostAggregate,
	},
	user::UserView,
};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServiceResponse {
	Post(PostAggregate),
	Posts(Vec<PostAggregate>),
	Comment(Comment),
	User(UserView),
	Reaction {
		post_id: i64,
		reaction: Reaction,
		likes: usize,
		dislikes: usize,
	},
	Home {
		username: Option<String>,
	},
	Message {
		message: String,
	},
}

impl From<PostAggregate> for ServiceResponse {
	fn from(value: PostAggregate) -> Self {
		ServiceResponse::Post(value)
	}
}

impl From<Vec<PostAggregate>> for ServiceResponse {
	fn from(value: Vec<PostAggregate>) -> Self {
		ServiceResponse::Posts(value)
	}
}

impl From<Comment> for ServiceResponse {
	fn from(value: Comment) -> Self {
		ServiceResponse::Comment(value)
	}
}

impl From<UserView> for ServiceResponse {
	fn from(value: UserView) -> Self {
		ServiceResponse::User(value)
	}
}

impl From<String> for ServiceResponse {
	fn from(value: String) -> Self {
		ServiceResponse::Message { message: value }
	}
}

impl From<&str> for ServiceResponse {
	fn from(value: &str) -> Self {
		value.to_string().into()
	}
}

impl From<(&Post, Reaction)> for ServiceResponse {
	fn from((post, reaction): (&Post, Reaction)) -> Self {
		ServiceResponse::Reaction {
			post_id: post.id,
			reaction,
			likes: post.likes.len(),
			dislikes: post.dislikes.len(),
		}
	}
}

impl IntoResponse for ServiceResponse {
	fn into_response(self) -> Response {
		Json(self).into_response()
	}
}

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("{0}")]
	ValidationError(String),
	#[error("A user with this name already exists")]
	DuplicateUser,
	#[error("Invalid username or password")]
	InvalidCredentials,
	#[error("You are not logged in")]
	Unauthorized,
	#[error("{0} not found")]
	NotFound(&'static str),
	#[error("{0}")]
	Forbidden(String),
	#[error("Storage error: {0}")]
	StorageError(#[from] std::io::Error),
	#[error("Malformed document: {0}")]
	DeserializationError(#[from] serde_json::Error),
	#[error("TransactionError: {0}")]
	TransactionError(&'static str),
	#[error("Password hashing failed: {0}")]
	HashingError(String),
	#[error("Session token error: {0}")]
	TokenError(#[from] jsonwebtoken::errors::Error),
	#[error("Upload error: {0}")]
	UploadError(String),
	#[error("Rejected upload: {1}")]
	InvalidUpload(StatusCode, String),
	#[error("Configuration error: {0}")]
	ConfigError(String),
}

impl From<axum::extract::multipart::MultipartError> for ServiceError {
	fn from(value: axum::extract::multipart::MultipartError) -> Self {
		ServiceError::InvalidUpload(value.status(), value.body_text())
	}
}

impl ServiceError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
			ServiceError::DuplicateUser => StatusCode::CONFLICT,
			ServiceError::InvalidCredentials | ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
			ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
			ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
			ServiceError::InvalidUpload(status, _) => *status,
			ServiceError::StorageError(_)
			| ServiceError::DeserializationError(_)
			| ServiceError::TransactionError(_)
			| ServiceError::HashingError(_)
			| ServiceError::TokenError(_)
			| ServiceError::UploadError(_)
			| ServiceError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		match status {
			StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("Request failed: {}", self),
			StatusCode::FORBIDDEN => tracing::warn!("{}", self),
			_ => tracing::debug!("{}", self),
		}

		(
			status,
			Json(serde_json::json!({
				"error": self.to_string(),
				"status": status.as_u16(),
			})),
		)
			.into_response()
	}
}
