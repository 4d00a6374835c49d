use std::collections::HashMap;

use crate::domain::{document::Document, user::User};

use super::{Entity, Repository};

impl Entity for User {
	fn id(&self) -> i64 {
		self.id
	}
	fn collection(document: &Document) -> &Vec<Self> {
		&document.users
	}
	fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
		&mut document.users
	}
	fn sequence(document: &mut Document) -> &mut i64 {
		&mut document.sequences.users
	}
}

impl Repository<User> {
	/// Usernames are compared case-sensitively.
	pub fn find_by_username<'a>(
		document: &'a Document,
		username: &str,
	) -> Option<&'a User> {
		document.users.iter().find(|user| user.username == username)
	}

	/// id -> username, for resolving authors.
	pub fn usernames(document: &Document) -> HashMap<i64, &str> {
		document.users.iter().map(|user| (user.id, user.username.as_str())).collect()
	}
}
