use std::path::{Path, PathBuf};

use crate::{
	adapters::repositories::Repository,
	database::DocumentStore,
	domain::{
		post::{
			commands::{has_required_fields, CreatePost, ImageUpload, UpdatePost},
			entity::{Post, Reaction},
			PostAggregate,
		},
		timestamp,
		user::User,
	},
	services::response::ServiceError,
};

use super::{comment_views, post_aggregate};

pub struct PostHandler;
impl PostHandler {
	pub async fn list(store: &DocumentStore) -> Result<Vec<PostAggregate>, ServiceError> {
		let document = store.load().await?;
		let usernames = Repository::<User>::usernames(&document);

		Ok(document.posts.iter().map(|post| post_aggregate(&usernames, post)).collect())
	}

	/// A single post with its comments.
	pub async fn get(
		post_id: i64,
		store: &DocumentStore,
	) -> Result<PostAggregate, ServiceError> {
		let document = store.load().await?;
		let post = Repository::<Post>::get(&document, post_id).ok_or(ServiceError::NotFound("Post"))?;
		let usernames = Repository::<User>::usernames(&document);

		Ok(post_aggregate(&usernames, post).with_comments(comment_views(&document, &usernames, post_id)))
	}

	pub async fn create(
		owner_id: i64,
		command: CreatePost,
		store: &DocumentStore,
		upload_folder: &Path,
	) -> Result<PostAggregate, ServiceError> {
		let CreatePost {
			theme,
			title,
			content,
			tags,
			image,
		} = command;
		if !has_required_fields(&theme, &title, &content) {
			return Err(ServiceError::ValidationError("Fill in all fields".into()));
		}

		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;
		let username = Repository::<User>::get(document, owner_id).ok_or(ServiceError::NotFound("User"))?.username.clone();

		let staged = match image {
			Some(image) => StagedImage::write(image, upload_folder).await?,
			None => None,
		};

		let post = Repository::<Post>::add(document, |id| Post {
			id,
			user_id: owner_id,
			theme,
			title,
			content,
			image_url: staged.as_ref().map(|staged| staged.url.clone()),
			tags,
			created_at: timestamp(),
			..Default::default()
		})
		.clone();
		if let Err(err) = executor.commit().await {
			if let Some(staged) = staged {
				staged.discard().await;
			}
			return Err(err);
		}
		if let Some(staged) = staged {
			staged.publish().await?;
		}

		tracing::info!(post_id = post.id, user_id = owner_id, "Post created");
		Ok(PostAggregate::new(post, username))
	}

	pub async fn update(
		post_id: i64,
		owner_id: i64,
		command: UpdatePost,
		store: &DocumentStore,
	) -> Result<PostAggregate, ServiceError> {
		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;

		let post = Repository::<Post>::get_mut(document, post_id).ok_or(ServiceError::NotFound("Post"))?;
		if !post.is_owned_by(owner_id) {
			return Err(ServiceError::Forbidden("You are not allowed to edit this post".into()));
		}
		if !has_required_fields(&command.theme, &command.title, &command.content) {
			return Err(ServiceError::ValidationError("Fill in all fields".into()));
		}

		post.theme = command.theme;
		post.title = command.title;
		post.content = command.content;
		post.tags = command.tags;
		let post = post.clone();
		let aggregate = post_aggregate(&Repository::<User>::usernames(document), &post);
		executor.commit().await?;

		tracing::info!(post_id, "Post updated");
		Ok(aggregate)
	}

	/// Removes the post. Its comments stay in the document.
	pub async fn delete(
		post_id: i64,
		owner_id: i64,
		store: &DocumentStore,
	) -> Result<(), ServiceError> {
		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;

		let post = Repository::<Post>::get(document, post_id).ok_or(ServiceError::NotFound("Post"))?;
		if !post.is_owned_by(owner_id) {
			return Err(ServiceError::Forbidden("You are not allowed to delete this post".into()));
		}
		Repository::<Post>::remove(document, post_id);
		executor.commit().await?;

		tracing::info!(post_id, "Post deleted");
		Ok(())
	}

	pub async fn toggle_like(
		post_id: i64,
		user_id: i64,
		store: &DocumentStore,
	) -> Result<(Post, Reaction), ServiceError> {
		Self::react(post_id, store, |post| post.toggle_like(user_id)).await
	}

	pub async fn toggle_dislike(
		post_id: i64,
		user_id: i64,
		store: &DocumentStore,
	) -> Result<(Post, Reaction), ServiceError> {
		Self::react(post_id, store, |post| post.toggle_dislike(user_id)).await
	}

	async fn react(
		post_id: i64,
		store: &DocumentStore,
		toggle: impl FnOnce(&mut Post) -> Reaction,
	) -> Result<(Post, Reaction), ServiceError> {
		let mut executor = store.executor().await;
		executor.begin().await?;
		let post = Repository::<Post>::get_mut(executor.document_mut()?, post_id).ok_or(ServiceError::NotFound("Post"))?;
		let reaction = toggle(post);
		let post = post.clone();
		executor.commit().await?;

		tracing::debug!(post_id, ?reaction, "Reaction toggled");
		Ok((post, reaction))
	}
}

/// An upload written next to its final name, moved into place once the post referencing it is stored.
///
/// Only the last path component of the client-supplied name is kept; publishing over an existing
/// file replaces it.
struct StagedImage {
	tmp_path: PathBuf,
	path: PathBuf,
	url: String,
}

impl StagedImage {
	async fn write(
		image: ImageUpload,
		upload_folder: &Path,
	) -> Result<Option<Self>, ServiceError> {
		let Some(file_name) = Path::new(&image.file_name).file_name().and_then(|name| name.to_str()) else {
			return Ok(None);
		};

		let staged = Self {
			tmp_path: upload_folder.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4())),
			path: upload_folder.join(file_name),
			url: format!("/uploads/{file_name}"),
		};
		tokio::fs::write(&staged.tmp_path, &image.data).await.map_err(|err| {
			tracing::error!("Saving upload {} failed : {:?}", file_name, err);
			ServiceError::UploadError(err.to_string())
		})?;
		Ok(Some(staged))
	}

	async fn publish(self) -> Result<(), ServiceError> {
		tokio::fs::rename(&self.tmp_path, &self.path).await.map_err(|err| {
			tracing::error!("Moving upload to {:?} failed : {:?}", self.path, err);
			ServiceError::UploadError(err.to_string())
		})
	}

	async fn discard(self) {
		if let Err(err) = tokio::fs::remove_file(&self.tmp_path).await {
			tracing::warn!("Leftover upload {:?} : {:?}", self.tmp_path, err);
		}
	}
}

#[cfg(test)]
mod test {
	use bytes::Bytes;

	use super::PostHandler;
	use crate::{
		database::{test::temp_store, DocumentStore},
		domain::post::{
			commands::{ImageUpload, UpdatePost},
			entity::Reaction,
		},
		services::{
			handlers::{
				test::{create_post, new_post, register},
				CommentHandler,
			},
			response::ServiceError,
		},
	};

	#[tokio::test]
	async fn test_create_and_get_post() {
		'_given: {
			let (_dir, store) = temp_store();
			let alice = register(&store, "alice").await;

			'_when: {
				let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &["intro"])).await;
				let post = PostHandler::get(post_id, &store).await.unwrap();

				assert_eq!(post.title, "Hello");
				assert_eq!(post.username(), "alice");
				assert_eq!(post.tags, vec!["intro".to_string()]);
				assert!(post.comments().is_empty());
				assert!(!post.created_at.is_empty());
				assert_eq!(post.image_url, None);
			}
		}
	}

	#[tokio::test]
	async fn test_create_requires_fields() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;
		let upload_dir = tempfile::tempdir().unwrap();

		for command in [new_post("", "t", "c", &[]), new_post("th", "", "c", &[]), new_post("th", "t", "", &[])] {
			let result = PostHandler::create(alice, command, &store, upload_dir.path()).await;
			assert!(matches!(result, Err(ServiceError::ValidationError(_))));
		}
		assert!(store.load().await.unwrap().posts.is_empty());
	}

	#[tokio::test]
	async fn test_create_for_unknown_owner() {
		let (_dir, store) = temp_store();
		let upload_dir = tempfile::tempdir().unwrap();

		let result = PostHandler::create(99, new_post("th", "t", "c", &[]), &store, upload_dir.path()).await;
		assert!(matches!(result, Err(ServiceError::NotFound("User"))));
	}

	#[tokio::test]
	async fn test_create_with_image_keeps_only_file_name() {
		'_given: {
			let (_dir, store) = temp_store();
			let alice = register(&store, "alice").await;
			let upload_dir = tempfile::tempdir().unwrap();
			let mut command = new_post("th", "t", "c", &[]);
			command.image = Some(ImageUpload {
				file_name: "../../cat.png".into(),
				data: Bytes::from_static(b"png"),
			});

			'_when: {
				let post = PostHandler::create(alice, command, &store, upload_dir.path()).await.unwrap();

				assert_eq!(post.image_url.as_deref(), Some("/uploads/cat.png"));
				assert_eq!(std::fs::read(upload_dir.path().join("cat.png")).unwrap(), b"png");
			}
		}
	}

	#[tokio::test]
	async fn test_failed_create_leaves_uploads_untouched() {
		'_given: {
			let (_seed_dir, seed) = temp_store();
			let alice = register(&seed, "alice").await;
			// no temp file fits next to a name this long, so every commit fails
			let dir = tempfile::tempdir().unwrap();
			let path = dir.path().join(format!("{}.json", "d".repeat(245)));
			std::fs::copy(seed.path(), &path).unwrap();
			let store = DocumentStore::new(path.clone());

			let upload_dir = tempfile::tempdir().unwrap();
			std::fs::write(upload_dir.path().join("cat.png"), b"original").unwrap();
			let mut command = new_post("th", "t", "c", &[]);
			command.image = Some(ImageUpload {
				file_name: "cat.png".into(),
				data: Bytes::from_static(b"replacement"),
			});

			'_when: {
				let result = PostHandler::create(alice, command, &store, upload_dir.path()).await;

				assert!(matches!(result, Err(ServiceError::StorageError(_))));
				assert_eq!(std::fs::read(upload_dir.path().join("cat.png")).unwrap(), b"original");
				assert_eq!(std::fs::read_dir(upload_dir.path()).unwrap().count(), 1);
				assert!(store.load().await.unwrap().posts.is_empty());
			}
		}
	}

	#[tokio::test]
	async fn test_update_by_owner() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;
		let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &["intro"])).await;

		let update = UpdatePost {
			theme: "life".into(),
			title: "Bye".into(),
			content: "moon".into(),
			tags: vec![],
		};
		let post = PostHandler::update(post_id, alice, update, &store).await.unwrap();

		assert_eq!((post.theme.as_str(), post.title.as_str(), post.content.as_str()), ("life", "Bye", "moon"));
		assert!(post.tags.is_empty());
		assert_eq!(PostHandler::get(post_id, &store).await.unwrap().title, "Bye");
	}

	#[tokio::test]
	async fn test_update_by_someone_else_is_forbidden() {
		'_given: {
			let (_dir, store) = temp_store();
			let alice = register(&store, "alice").await;
			let bob = register(&store, "bob").await;
			let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &[])).await;

			'_when: {
				let update = UpdatePost {
					theme: "x".into(),
					title: "x".into(),
					content: "x".into(),
					tags: vec![],
				};
				let result = PostHandler::update(post_id, bob, update, &store).await;

				assert!(matches!(result, Err(ServiceError::Forbidden(_))));
				assert_eq!(PostHandler::get(post_id, &store).await.unwrap().title, "Hello");
			}
		}
	}

	#[tokio::test]
	async fn test_update_and_delete_missing_post() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;

		let result = PostHandler::update(5, alice, UpdatePost::default(), &store).await;
		assert!(matches!(result, Err(ServiceError::NotFound("Post"))));
		let result = PostHandler::delete(5, alice, &store).await;
		assert!(matches!(result, Err(ServiceError::NotFound("Post"))));
	}

	#[tokio::test]
	async fn test_update_with_empty_field() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;
		let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &[])).await;

		let result = PostHandler::update(post_id, alice, UpdatePost::default(), &store).await;
		assert!(matches!(result, Err(ServiceError::ValidationError(_))));
	}

	#[tokio::test]
	async fn test_delete_keeps_comments() {
		'_given: {
			let (_dir, store) = temp_store();
			let alice = register(&store, "alice").await;
			let bob = register(&store, "bob").await;
			let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &[])).await;
			let comment = CommentHandler::create(post_id, bob, "nice", &store).await.unwrap();

			'_when: {
				assert!(matches!(
					PostHandler::delete(post_id, bob, &store).await,
					Err(ServiceError::Forbidden(_))
				));
				PostHandler::delete(post_id, alice, &store).await.unwrap();

				assert!(matches!(PostHandler::get(post_id, &store).await, Err(ServiceError::NotFound(_))));
				let orphan = CommentHandler::get(comment.id, &store).await.unwrap();
				assert_eq!(orphan.post_id, post_id);
			}
		}
	}

	#[tokio::test]
	async fn test_toggle_reactions() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;
		let post_id = create_post(&store, alice, new_post("tech", "Hello", "world", &[])).await;

		let (_, reaction) = PostHandler::toggle_like(post_id, alice, &store).await.unwrap();
		assert_eq!(reaction, Reaction::Liked);
		let (_, reaction) = PostHandler::toggle_like(post_id, alice, &store).await.unwrap();
		assert_eq!(reaction, Reaction::Neutral);

		PostHandler::toggle_like(post_id, alice, &store).await.unwrap();
		let (post, reaction) = PostHandler::toggle_dislike(post_id, alice, &store).await.unwrap();
		assert_eq!(reaction, Reaction::Disliked);
		assert!(post.likes.is_empty());
		assert!(post.dislikes.contains(&alice));

		let stored = PostHandler::get(post_id, &store).await.unwrap();
		assert_eq!(stored.reaction_of(alice), Reaction::Disliked);
	}

	#[tokio::test]
	async fn test_toggle_on_missing_post() {
		let (_dir, store) = temp_store();
		assert!(matches!(
			PostHandler::toggle_dislike(1, 1, &store).await,
			Err(ServiceError::NotFound("Post"))
		));
	}

	#[tokio::test]
	async fn test_list_resolves_missing_author() {
		let (_dir, store) = temp_store();
		let alice = register(&store, "alice").await;
		create_post(&store, alice, new_post("tech", "Hello", "world", &[])).await;
		let mut document = store.load().await.unwrap();
		document.users.clear();
		store.save(&document).await.unwrap();

		let posts = PostHandler::list(&store).await.unwrap();
		assert_eq!(posts.len(), 1);
		assert_eq!(posts[0].username(), "Unknown");
	}
}
