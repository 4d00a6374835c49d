use axum::{
	extract::{Multipart, Path, State},
	http::StatusCode,
	Form,
};
use axum_macros::debug_handler;

use crate::{
	common::session::CurrentUser,
	dependencies::AppState,
	domain::post::commands::{parse_tags, CreatePost, ImageUpload, UpdatePost},
	services::{
		handlers::PostHandler,
		response::{ServiceError, ServiceResponse},
	},
};

pub async fn list_posts(State(state): State<AppState>) -> Result<ServiceResponse, ServiceError> {
	Ok(PostHandler::list(&state.store).await?.into())
}

pub async fn view_post(
	State(state): State<AppState>,
	Path(post_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	Ok(PostHandler::get(post_id, &state.store).await?.into())
}

#[debug_handler(state = AppState)]
pub async fn create_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	multipart: Multipart,
) -> Result<(StatusCode, ServiceResponse), ServiceError> {
	let command = read_create_post(multipart).await?;
	let post = PostHandler::create(user.user_id, command, &state.store, state.upload_folder()).await?;
	Ok((StatusCode::CREATED, post.into()))
}

/// Collects the post form. An `image` part without a file name counts as no image.
async fn read_create_post(mut multipart: Multipart) -> Result<CreatePost, ServiceError> {
	let mut command = CreatePost::default();
	while let Some(field) = multipart.next_field().await? {
		let name = field.name().unwrap_or_default().to_string();
		match name.as_str() {
			"theme" => command.theme = field.text().await?,
			"title" => command.title = field.text().await?,
			"content" => command.content = field.text().await?,
			"tags" => command.tags = parse_tags(&field.text().await?),
			"image" => {
				let file_name = field.file_name().unwrap_or_default().to_string();
				let data = field.bytes().await?;
				if !file_name.is_empty() {
					command.image = Some(ImageUpload { file_name, data });
				}
			}
			other => tracing::debug!("Ignoring form field {:?}", other),
		}
	}
	Ok(command)
}

pub async fn edit_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(post_id): Path<i64>,
	Form(command): Form<UpdatePost>,
) -> Result<ServiceResponse, ServiceError> {
	Ok(PostHandler::update(post_id, user.user_id, command, &state.store).await?.into())
}

pub async fn delete_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(post_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	PostHandler::delete(post_id, user.user_id, &state.store).await?;
	Ok("Post deleted".into())
}

pub async fn like_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(post_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	let (post, reaction) = PostHandler::toggle_like(post_id, user.user_id, &state.store).await?;
	Ok((&post, reaction).into())
}

pub async fn dislike_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	Path(post_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	let (post, reaction) = PostHandler::toggle_dislike(post_id, user.user_id, &state.store).await?;
	Ok((&post, reaction).into())
}
