mod auth;
mod comment;
mod post;
mod search;

pub use auth::AuthHandler;
pub use comment::CommentHandler;
pub use post::PostHandler;
pub use search::{SearchFilter, SearchHandler};

use std::collections::HashMap;

use crate::{
	adapters::repositories::Repository,
	domain::{
		comment::{Comment, CommentView},
		document::Document,
		post::{entity::Post, PostAggregate},
		UNKNOWN_AUTHOR,
	},
};

fn author_name(
	usernames: &HashMap<i64, &str>,
	user_id: i64,
) -> String {
	usernames.get(&user_id).copied().unwrap_or(UNKNOWN_AUTHOR).to_string()
}

pub(crate) fn post_aggregate(
	usernames: &HashMap<i64, &str>,
	post: &Post,
) -> PostAggregate {
	PostAggregate::new(post.clone(), author_name(usernames, post.user_id))
}

/// Comments under `post_id` in document order, authors resolved.
pub(crate) fn comment_views(
	document: &Document,
	usernames: &HashMap<i64, &str>,
	post_id: i64,
) -> Vec<CommentView> {
	Repository::<Comment>::for_post(document, post_id)
		.map(|comment| CommentView {
			id: comment.id,
			text: comment.text.clone(),
			username: author_name(usernames, comment.user_id),
			created_at: comment.created_at.clone(),
		})
		.collect()
}
