use std::str::FromStr;

use crate::{
	adapters::repositories::Repository,
	database::DocumentStore,
	domain::{
		post::{entity::Post, PostAggregate},
		user::User,
	},
	services::response::ServiceError,
};

use super::{comment_views, post_aggregate};

/// Which part of a post a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
	/// Title, content, theme, author and tags.
	#[default]
	All,
	Title,
	Content,
	Theme,
	Author,
}

impl FromStr for SearchFilter {
	type Err = ServiceError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all" => Ok(SearchFilter::All),
			"title" => Ok(SearchFilter::Title),
			"content" => Ok(SearchFilter::Content),
			"theme" => Ok(SearchFilter::Theme),
			"author" => Ok(SearchFilter::Author),
			other => Err(ServiceError::ValidationError(format!("Unknown search filter: {other}"))),
		}
	}
}

impl SearchFilter {
	/// `query` is expected lowercased already.
	pub fn matches(
		self,
		query: &str,
		post: &Post,
		author: &str,
	) -> bool {
		let hit = |field: &str| field.to_lowercase().contains(query);
		match self {
			SearchFilter::All => {
				hit(&post.title)
					|| hit(&post.content)
					|| hit(&post.theme)
					|| hit(author)
					|| post.tags.iter().any(|tag| hit(tag))
			}
			SearchFilter::Title => hit(&post.title),
			SearchFilter::Content => hit(&post.content),
			SearchFilter::Theme => hit(&post.theme),
			SearchFilter::Author => hit(author),
		}
	}
}

pub struct SearchHandler;
impl SearchHandler {
	/// Case-insensitive substring search. An empty query finds nothing, and so
	/// does an unknown filter name.
	pub async fn search(
		query: &str,
		filter_by: &str,
		store: &DocumentStore,
	) -> Result<Vec<PostAggregate>, ServiceError> {
		let query = query.to_lowercase();
		if query.is_empty() {
			return Ok(vec![]);
		}
		let Ok(filter) = filter_by.parse::<SearchFilter>() else {
			tracing::debug!("Unknown search filter {:?}", filter_by);
			return Ok(vec![]);
		};

		let document = store.load().await?;
		let usernames = Repository::<User>::usernames(&document);

		let results: Vec<PostAggregate> = document
			.posts
			.iter()
			// a missing author matches as an empty name
			.filter(|post| filter.matches(&query, post, usernames.get(&post.user_id).copied().unwrap_or_default()))
			.map(|post| post_aggregate(&usernames, post).with_comments(comment_views(&document, &usernames, post.id)))
			.collect();

		tracing::debug!(hits = results.len(), ?filter, "Search for {:?}", query);
		Ok(results)
	}
}
