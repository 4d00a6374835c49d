use std::{path::PathBuf, sync::Arc};

use crate::{config::Config, database::DocumentStore};

/// Everything a request handler needs, cloned into each request.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub store: DocumentStore,
}

impl AppState {
	pub fn new(config: Config) -> Self {
		let store = DocumentStore::new(config.data_file.clone());
		Self {
			config: Arc::new(config),
			store,
		}
	}

	pub fn upload_folder(&self) -> &PathBuf {
		&self.config.upload_folder
	}
}
