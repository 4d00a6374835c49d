use serde::{Deserialize, Serialize};

use super::{comment::Comment, post::entity::Post, user::User};

/// The whole application state. It is loaded and saved as one unit.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Document {
	#[serde(default)]
	pub users: Vec<User>,
	#[serde(default)]
	pub posts: Vec<Post>,
	#[serde(default)]
	pub comments: Vec<Comment>,
	#[serde(default)]
	pub sequences: Sequences,
}

/// Last id handed out per collection. Never decreases, so deleted ids are not reused.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Sequences {
	#[serde(default)]
	pub users: i64,
	#[serde(default)]
	pub posts: i64,
	#[serde(default)]
	pub comments: i64,
}

#[cfg(test)]
mod test {
	use super::Document;

	#[test]
	fn test_load_document_without_sequences() {
		'_given: {
			let raw = r#"{
				"users": [{"id": 1, "username": "alice", "password_hash": "x"}],
				"posts": [{"id": 3, "user_id": 1, "title": "Hello", "content": "world"}],
				"comments": []
			}"#;

			'_when: {
				let document: Document = serde_json::from_str(raw).unwrap();

				assert_eq!(document.sequences.posts, 0);
				let post = &document.posts[0];
				assert_eq!(post.theme, "");
				assert!(post.tags.is_empty());
				assert!(post.likes.is_empty() && post.dislikes.is_empty());
				assert_eq!(post.image_url, None);
			}
		}
	}

	#[test]
	fn test_empty_document_keys() {
		let jsonified = serde_json::to_value(Document::default()).unwrap();
		assert_eq!(jsonified["users"], serde_json::json!([]));
		assert_eq!(jsonified["posts"], serde_json::json!([]));
		assert_eq!(jsonified["comments"], serde_json::json!([]));
	}
}
