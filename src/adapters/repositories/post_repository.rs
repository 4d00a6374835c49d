use crate::domain::{document::Document, post::entity::Post};

use super::{Entity, Repository};

impl Entity for Post {
	fn id(&self) -> i64 {
		self.id
	}
	fn collection(document: &Document) -> &Vec<Self> {
		&document.posts
	}
	fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
		&mut document.posts
	}
	fn sequence(document: &mut Document) -> &mut i64 {
		&mut document.sequences.posts
	}
}

impl Repository<Post> {
	pub fn exists(
		document: &Document,
		post_id: i64,
	) -> bool {
		Self::get(document, post_id).is_some()
	}
}
