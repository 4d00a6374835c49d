use axum::{
	extract::{Path, State},
	http::StatusCode,
	Form,
};
use serde::Deserialize;

use crate::{
	common::session::CurrentUser,
	dependencies::AppState,
	services::{
		handlers::CommentHandler,
		response::{ServiceError, ServiceResponse},
	},
};

#[derive(Debug, Deserialize)]
pub struct NewComment {
	#[serde(default)]
	pub text: String,
}

pub async fn add_comment(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(post_id): Path<i64>,
	Form(form): Form<NewComment>,
) -> Result<(StatusCode, ServiceResponse), ServiceError> {
	let comment = CommentHandler::create(post_id, user.user_id, &form.text, &state.store).await?;
	Ok((StatusCode::CREATED, comment.into()))
}

pub async fn view_comment(
	State(state): State<AppState>,
	Path(comment_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	Ok(CommentHandler::get(comment_id, &state.store).await?.into())
}

pub async fn delete_comment(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(comment_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	Ok(CommentHandler::delete(comment_id, user.user_id, &state.store).await?.into())
}
