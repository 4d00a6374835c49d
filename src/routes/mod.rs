mod auth;
mod comments;
mod home;
mod posts;
mod search;

use axum::{
	extract::DefaultBodyLimit,
	middleware,
	routing::{get, post},
	Router,
};
use tower_http::services::ServeDir;

use crate::{common::session::set_session, dependencies::AppState};

/// Largest request body accepted, uploads included.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
	let uploads = ServeDir::new(state.upload_folder());

	Router::new()
		.route("/", get(home::index))
		.route("/register", post(auth::register))
		.route("/login", post(auth::login))
		.route("/logout", get(auth::logout).post(auth::logout))
		.route("/posts", get(posts::list_posts))
		.route("/posts/create", post(posts::create_post))
		.route("/posts/:post_id", get(posts::view_post))
		.route("/posts/:post_id/edit", post(posts::edit_post))
		.route("/posts/:post_id/delete", post(posts::delete_post))
		.route("/posts/:post_id/like", post(posts::like_post))
		.route("/posts/:post_id/dislike", post(posts::dislike_post))
		.route("/posts/:post_id/comment", post(comments::add_comment))
		.route("/comments/:comment_id", get(comments::view_comment))
		.route("/comments/:comment_id/delete", post(comments::delete_comment))
		.route("/search", get(search::search_posts))
		.nest_service("/uploads", uploads)
		.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
		.layer(middleware::from_fn_with_state(state.clone(), set_session))
		.with_state(state)
}
