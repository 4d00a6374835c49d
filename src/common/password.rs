/// Password hashing and verification using Argon2id
use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};

use crate::services::response::ServiceError;

/// Hashes with a fresh random salt and returns a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
	let salt = SaltString::generate(&mut OsRng);
	let password_hash = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|e| ServiceError::HashingError(e.to_string()))?
		.to_string();

	Ok(password_hash)
}

/// `Ok(false)` for a wrong password, and also for a stored hash this module cannot read,
/// such as one left by another hashing scheme.
pub fn verify_password(
	password: &str,
	password_hash: &str,
) -> Result<bool, ServiceError> {
	let parsed_hash = match PasswordHash::new(password_hash) {
		Ok(parsed_hash) => parsed_hash,
		Err(err) => {
			tracing::warn!("Stored password hash is not a PHC string: {}", err);
			return Ok(false);
		}
	};

	match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
		Ok(_) => Ok(true),
		Err(argon2::password_hash::Error::Password) => Ok(false),
		Err(err @ argon2::password_hash::Error::Algorithm) => {
			tracing::warn!("Stored password hash uses another algorithm: {}", err);
			Ok(false)
		}
		Err(e) => Err(ServiceError::HashingError(e.to_string())),
	}
}
