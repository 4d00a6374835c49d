use crate::{config::Config, dependencies::AppState, services::response::ServiceError};

pub struct Bootstrap;
impl Bootstrap {
	/// Prepares the upload folder and wires the store to the configured data file.
	pub async fn app_state(config: Config) -> Result<AppState, ServiceError> {
		tokio::fs::create_dir_all(&config.upload_folder).await.map_err(|err| {
			tracing::error!("Cannot create upload folder {:?} : {:?}", config.upload_folder, err);
			err
		})?;
		if let Some(parent) = config.data_file.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}
		tracing::info!("Using data file {:?}", config.data_file);

		Ok(AppState::new(config))
	}
}
