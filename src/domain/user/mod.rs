use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub username: String,
	pub password_hash: String,
}

/// What the outside world gets to see of a user.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct UserView {
	pub id: i64,
	pub username: String,
}

impl From<&User> for UserView {
	fn from(value: &User) -> Self {
		Self {
			id: value.id,
			username: value.username.clone(),
		}
	}
}
