use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Default, Clone)]
pub struct CreatePost {
	pub theme: String,
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
	/// Name as sent by the client.
	pub file_name: String,
	pub data: Bytes,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdatePost {
	#[serde(default)]
	pub theme: String,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub content: String,
	#[serde(default, deserialize_with = "deserialize_tags")]
	pub tags: Vec<String>,
}

/// Theme, title and content are the fields a post cannot go without.
pub(crate) fn has_required_fields(
	theme: &str,
	title: &str,
	content: &str,
) -> bool {
	!theme.is_empty() && !title.is_empty() && !content.is_empty()
}

/// Splits `"rust, web,,  "` into `["rust", "web"]`.
pub fn parse_tags(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|tag| !tag.is_empty())
		.map(ToString::to_string)
		.collect()
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;
	Ok(raw.as_deref().map(parse_tags).unwrap_or_default())
}
