use crate::domain::{comment::Comment, document::Document};

use super::{Entity, Repository};

impl Entity for Comment {
	fn id(&self) -> i64 {
		self.id
	}
	fn collection(document: &Document) -> &Vec<Self> {
		&document.comments
	}
	fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
		&mut document.comments
	}
	fn sequence(document: &mut Document) -> &mut i64 {
		&mut document.sequences.comments
	}
}

impl Repository<Comment> {
	pub fn for_post(
		document: &Document,
		post_id: i64,
	) -> impl Iterator<Item = &Comment> {
		document.comments.iter().filter(move |comment| comment.post_id == post_id)
	}
}
