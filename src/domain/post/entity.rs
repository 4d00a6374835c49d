use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Post {
	pub id: i64,
	pub user_id: i64,
	#[serde(default)]
	pub theme: String,
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub image_url: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub likes: BTreeSet<i64>,
	#[serde(default)]
	pub dislikes: BTreeSet<i64>,
}

/// Where a single user stands on a post.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
	Liked,
	Disliked,
	Neutral,
}

impl Post {
	pub fn reaction_of(
		&self,
		user_id: i64,
	) -> Reaction {
		if self.likes.contains(&user_id) {
			Reaction::Liked
		} else if self.dislikes.contains(&user_id) {
			Reaction::Disliked
		} else {
			Reaction::Neutral
		}
	}

	/// neutral -> liked, liked -> neutral, disliked -> liked
	pub fn toggle_like(
		&mut self,
		user_id: i64,
	) -> Reaction {
		if self.likes.remove(&user_id) {
			return Reaction::Neutral;
		}
		self.dislikes.remove(&user_id);
		self.likes.insert(user_id);
		Reaction::Liked
	}

	/// neutral -> disliked, disliked -> neutral, liked -> disliked
	pub fn toggle_dislike(
		&mut self,
		user_id: i64,
	) -> Reaction {
		if self.dislikes.remove(&user_id) {
			return Reaction::Neutral;
		}
		self.likes.remove(&user_id);
		self.dislikes.insert(user_id);
		Reaction::Disliked
	}

	pub fn is_owned_by(
		&self,
		user_id: i64,
	) -> bool {
		self.user_id == user_id
	}
}

#[cfg(test)]
mod test {
	use super::{Post, Reaction};

	#[test]
	fn test_like_twice_returns_to_neutral() {
		let mut post = Post::default();

		assert_eq!(post.toggle_like(7), Reaction::Liked);
		assert_eq!(post.toggle_like(7), Reaction::Neutral);
		assert_eq!(post.reaction_of(7), Reaction::Neutral);
		assert!(post.likes.is_empty() && post.dislikes.is_empty());
	}

	#[test]
	fn test_like_then_dislike_leaves_only_dislike() {
		let mut post = Post::default();
		post.toggle_like(7);

		assert_eq!(post.toggle_dislike(7), Reaction::Disliked);
		assert!(!post.likes.contains(&7));
		assert!(post.dislikes.contains(&7));
	}

	#[test]
	fn test_dislike_then_like_moves_to_likes() {
		let mut post = Post::default();
		post.toggle_dislike(7);

		assert_eq!(post.toggle_like(7), Reaction::Liked);
		assert_eq!(post.likes.iter().copied().collect::<Vec<_>>(), vec![7]);
		assert!(post.dislikes.is_empty());
	}

	#[test]
	fn test_reactions_of_different_users_are_independent() {
		let mut post = Post::default();
		post.toggle_like(1);
		post.toggle_dislike(2);

		assert_eq!(post.reaction_of(1), Reaction::Liked);
		assert_eq!(post.reaction_of(2), Reaction::Disliked);
		assert_eq!(post.reaction_of(3), Reaction::Neutral);
	}
}
