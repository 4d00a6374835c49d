use std::path::PathBuf;

use crate::services::response::ServiceError;

pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	/// Port server is listening to
	pub server_ip_port: String,

	/// JSON document holding users, posts and comments
	pub data_file: PathBuf,
	pub upload_folder: PathBuf,

	/// Key session tokens are signed with
	pub secret_key: String,
	pub session_ttl_minutes: i64,
	pub allow_origins: String,
}

impl Config {
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or("info".to_string());
		let server_ip_port = std::env::var("SERVER_IP_PORT").unwrap_or("0.0.0.0:3000".into());
		let data_file = std::env::var("DATA_FILE").unwrap_or("data.json".into()).into();
		let upload_folder = std::env::var("UPLOAD_FOLDER").unwrap_or("uploads".into()).into();
		let secret_key = std::env::var("SECRET_KEY").map_err(|_| ServiceError::ConfigError("SECRET_KEY must be set!".into()))?;
		let session_ttl_minutes = match std::env::var("SESSION_TTL_MINUTES") {
			Ok(raw) => raw
				.parse()
				.map_err(|_| ServiceError::ConfigError(format!("SESSION_TTL_MINUTES is not a number: {raw}")))?,
			Err(_) => 60 * 24,
		};
		let allow_origins = std::env::var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000".to_string());

		Ok(Config {
			log_level,
			server_ip_port,
			data_file,
			upload_folder,
			secret_key,
			session_ttl_minutes,
			allow_origins,
		})
	}
}
