use std::ops::Deref;

use serde::Serialize;

use self::entity::Post;
use super::comment::CommentView;
pub mod commands;
pub mod entity;

/// A post together with everything a reader needs to render it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PostAggregate {
	#[serde(flatten)]
	pub(crate) post: Post,
	pub(crate) username: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) comments: Option<Vec<CommentView>>,
}

impl PostAggregate {
	pub fn new(
		post: Post,
		username: String,
	) -> Self {
		Self {
			post,
			username,
			comments: None,
		}
	}
	pub fn with_comments(
		mut self,
		comments: Vec<CommentView>,
	) -> Self {
		self.comments = Some(comments);
		self
	}
	pub fn username(&self) -> &str {
		&self.username
	}
	pub fn comments(&self) -> &[CommentView] {
		self.comments.as_deref().unwrap_or_default()
	}
}

impl Deref for PostAggregate {
	type Target = Post;
	fn deref(&self) -> &Self::Target {
		&self.post
	}
}
