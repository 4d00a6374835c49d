use axum_extra::extract::cookie::CookieJar;

use crate::{
	adapters::repositories::Repository,
	common::{
		password::{hash_password, verify_password},
		session::{expired_session_cookie, issue_token},
	},
	config::Config,
	database::DocumentStore,
	domain::user::{User, UserView},
	services::response::ServiceError,
};

pub struct AuthHandler;
impl AuthHandler {
	pub async fn register(
		username: &str,
		password: &str,
		store: &DocumentStore,
	) -> Result<UserView, ServiceError> {
		if username.is_empty() || password.is_empty() {
			return Err(ServiceError::ValidationError("Fill in all fields".into()));
		}
		let password = password.to_string();
		let password_hash = off_runtime(move || hash_password(&password)).await?;

		let mut executor = store.executor().await;
		executor.begin().await?;
		let document = executor.document_mut()?;
		if Repository::<User>::find_by_username(document, username).is_some() {
			return Err(ServiceError::DuplicateUser);
		}
		let user = UserView::from(Repository::<User>::add(document, |id| User {
			id,
			username: username.to_string(),
			password_hash,
		}));
		executor.commit().await?;

		tracing::info!(user_id = user.id, "Registered user {}", user.username);
		Ok(user)
	}

	/// Checks the credentials and returns the user along with a fresh session token.
	pub async fn login(
		username: &str,
		password: &str,
		store: &DocumentStore,
		config: &Config,
	) -> Result<(UserView, String), ServiceError> {
		if username.is_empty() || password.is_empty() {
			return Err(ServiceError::ValidationError("Fill in all fields".into()));
		}

		let document = store.load().await?;
		let user = Repository::<User>::find_by_username(&document, username).ok_or(ServiceError::InvalidCredentials)?;
		let (password, password_hash) = (password.to_string(), user.password_hash.clone());
		if !off_runtime(move || verify_password(&password, &password_hash)).await? {
			tracing::debug!("Wrong password for {}", username);
			return Err(ServiceError::InvalidCredentials);
		}

		let token = issue_token(user, config.secret_key.as_bytes(), config.session_ttl_minutes)?;
		tracing::info!(user_id = user.id, "User logged in");
		Ok((user.into(), token))
	}

	pub fn logout(jar: CookieJar) -> CookieJar {
		jar.remove(expired_session_cookie())
	}
}

/// Runs password hashing on the blocking pool.
async fn off_runtime<T: Send + 'static>(
	work: impl FnOnce() -> Result<T, ServiceError> + Send + 'static,
) -> Result<T, ServiceError> {
	tokio::task::spawn_blocking(work).await.map_err(|err| ServiceError::HashingError(err.to_string()))?
}
