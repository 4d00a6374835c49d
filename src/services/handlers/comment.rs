use crate::{
	adapters::repositories::Repository,
	database::DocumentStore,
	domain::{comment::Comment, post::entity::Post, timestamp, user::User},
	services::response::ServiceError,
};

pub struct CommentHandler;
impl CommentHandler {
	pub async fn get(
		comment_id: i64,
		store: &DocumentStore,
	) -> Result<Comment, ServiceError> {
		let document = store.load().await?;
		Repository::<Comment>::get(&document, comment_id)
			.cloned()
			.ok_or(ServiceError::NotFound("Comment"))
	}

	pub async fn create(
		post_id: i64,
		author_id: i64,
		text: &str,
		store: &DocumentStore,
	) -> Result<Comment, ServiceError> {
		if text.trim().is_empty() {
			return Err(ServiceError::ValidationError("Comment cannot be empty".into()));
		}

		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;
		if !Repository::<Post>::exists(document, post_id) {
			return Err(ServiceError::NotFound("Post"));
		}
		if Repository::<User>::get(document, author_id).is_none() {
			return Err(ServiceError::NotFound("User"));
		}

		let comment = Repository::<Comment>::add(document, |id| Comment {
			id,
			post_id,
			user_id: author_id,
			text: text.to_string(),
			created_at: timestamp(),
		})
		.clone();
		executor.commit().await?;

		tracing::info!(comment_id = comment.id, post_id, "Comment added");
		Ok(comment)
	}

	/// Removes the comment and hands it back, so the caller knows which post it was under.
	pub async fn delete(
		comment_id: i64,
		author_id: i64,
		store: &DocumentStore,
	) -> Result<Comment, ServiceError> {
		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;

		let comment = Repository::<Comment>::get(document, comment_id).ok_or(ServiceError::NotFound("Comment"))?;
		if comment.user_id != author_id {
			return Err(ServiceError::Forbidden("You are not allowed to delete this comment".into()));
		}
		let comment = Repository::<Comment>::remove(document, comment_id).ok_or(ServiceError::NotFound("Comment"))?;
		executor.commit().await?;

		tracing::info!(comment_id, post_id = comment.post_id, "Comment deleted");
		Ok(comment)
	}
}
