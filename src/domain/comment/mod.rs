use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Comment {
	pub id: i64,
	pub post_id: i64,
	pub user_id: i64,
	pub text: String,
	#[serde(default)]
	pub created_at: String,
}

/// Comment as rendered under a post, with the author's name resolved.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct CommentView {
	pub id: i64,
	pub text: String,
	pub username: String,
	pub created_at: String,
}
