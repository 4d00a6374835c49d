use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
	sync::Arc,
};

use serde::Serialize;
use tokio::{
	fs,
	io::AsyncWriteExt,
	sync::{Mutex, OwnedMutexGuard},
};

use crate::{domain::document::Document, services::response::ServiceError};

/// JSON file holding the whole [`Document`].
///
/// Saves go to a temp file next to the target and are renamed over it, so a
/// reader never observes a half-written document. Read-modify-write cycles
/// go through [`StoreExecutor`], which holds the store lock until it is
/// committed or dropped.
#[derive(Clone, Debug)]
pub struct DocumentStore {
	path: Arc<PathBuf>,
	lock: Arc<Mutex<()>>,
}

impl DocumentStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: Arc::new(path.into()),
			lock: Default::default(),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub async fn load(&self) -> Result<Document, ServiceError> {
		match fs::read(self.path.as_path()).await {
			Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::default()),
			Err(err) => Err(err.into()),
		}
	}

	pub async fn save(
		&self,
		document: &Document,
	) -> Result<(), ServiceError> {
		let mut bytes = Vec::new();
		let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
		let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
		document.serialize(&mut serializer)?;

		let tmp_path = self.tmp_path();
		let mut file = fs::File::create(&tmp_path).await?;
		let written = async {
			file.write_all(&bytes).await?;
			file.sync_all().await
		}
		.await;
		drop(file);
		if let Err(err) = written {
			let _ = fs::remove_file(&tmp_path).await;
			return Err(err.into());
		}

		fs::rename(&tmp_path, self.path.as_path()).await.map_err(|err| {
			tracing::error!("Error occurred while replacing {:?} : {:?}", self.path, err);
			err
		})?;
		Ok(())
	}

	/// Waits for the store lock. Other writers queue up behind the returned executor.
	pub async fn executor(&self) -> StoreExecutor {
		StoreExecutor {
			store: self.clone(),
			_guard: self.lock.clone().lock_owned().await,
			document: None,
		}
	}

	fn tmp_path(&self) -> PathBuf {
		let file_name = self.path.file_name().and_then(|name| name.to_str()).unwrap_or("data.json");
		self.path.with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
	}
}

pub struct StoreExecutor {
	store: DocumentStore,
	_guard: OwnedMutexGuard<()>,
	document: Option<Document>,
}

impl StoreExecutor {
	pub fn document_mut(&mut self) -> Result<&mut Document, ServiceError> {
		self.document.as_mut().ok_or(ServiceError::TransactionError("Transaction Has Not Begun!"))
	}

	pub async fn begin(&mut self) -> Result<(), ServiceError> {
		match self.document.as_mut() {
			None => {
				self.document = Some(self.store.load().await?);
				Ok(())
			}
			Some(_document) => {
				tracing::warn!("Transaction Begun Already!");
				Err(ServiceError::TransactionError("Transaction Begun Already!"))
			}
		}
	}

	/// Persists the document and releases the store lock.
	pub async fn commit(mut self) -> Result<(), ServiceError> {
		let document = self.document.take().ok_or(ServiceError::TransactionError("Transaction Has Not Begun!"))?;
		self.store.save(&document).await.map_err(|err| {
			tracing::error!("Error occurred during commit operation : {:?}", err);
			err
		})
	}
}

#[cfg(test)]
pub(crate) mod test {
	use std::time::Duration;

	use tempfile::TempDir;

	use super::DocumentStore;
	use crate::domain::{document::Document, user::User};

	pub(crate) fn temp_store() -> (TempDir, DocumentStore) {
		let dir = tempfile::tempdir().unwrap();
		let store = DocumentStore::new(dir.path().join("data.json"));
		(dir, store)
	}

	#[tokio::test]
	async fn test_load_missing_file_returns_empty_document() {
		let (_dir, store) = temp_store();
		assert_eq!(store.load().await.unwrap(), Document::default());
	}

	#[tokio::test]
	async fn test_save_then_load() {
		'_given: {
			let (dir, store) = temp_store();
			let mut document = Document::default();
			document.users.push(User {
				id: 1,
				username: "alice".into(),
				password_hash: "hash".into(),
			});

			'_when: {
				store.save(&document).await.unwrap();

				assert_eq!(store.load().await.unwrap(), document);
				// only the document itself remains, no temp files
				assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
				let raw = std::fs::read_to_string(store.path()).unwrap();
				assert!(raw.contains("\n    \"users\""));
			}
		}
	}

	#[tokio::test]
	async fn test_malformed_document_is_an_error() {
		let (_dir, store) = temp_store();
		std::fs::write(store.path(), "{ not json").unwrap();

		assert!(matches!(
			store.load().await,
			Err(crate::services::response::ServiceError::DeserializationError(_))
		));
	}

	#[tokio::test]
	async fn test_uncommitted_executor_discards_changes() {
		let (_dir, store) = temp_store();
		{
			let mut executor = store.executor().await;
			executor.begin().await.unwrap();
			executor.document_mut().unwrap().users.push(User::default());
		}
		assert!(store.load().await.unwrap().users.is_empty());
	}

	#[tokio::test]
	async fn test_executor_state_errors() {
		let (_dir, store) = temp_store();
		let mut executor = store.executor().await;
		assert!(executor.document_mut().is_err());

		executor.begin().await.unwrap();
		assert!(executor.begin().await.is_err());
	}

	#[tokio::test]
	async fn test_executor_serializes_writers() {
		let (_dir, store) = temp_store();

		let mut handles = Vec::new();
		for i in 0..10 {
			let store = store.clone();
			handles.push(tokio::spawn(async move {
				let mut executor = store.executor().await;
				executor.begin().await.unwrap();
				tokio::time::sleep(Duration::from_millis(1)).await;
				executor.document_mut().unwrap().users.push(User {
					id: i,
					..Default::default()
				});
				executor.commit().await.unwrap();
			}));
		}
		for handle in handles {
			handle.await.unwrap();
		}

		assert_eq!(store.load().await.unwrap().users.len(), 10);
	}
}
