use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
	extract::{FromRequestParts, State},
	http::{request::Parts, Request},
	middleware::Next,
	response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{dependencies::AppState, domain::user::User, services::response::ServiceError};

pub const SESSION_COOKIE: &str = "session";

/// Signed contents of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
	pub user_id: i64,
	pub username: String,
	exp: usize,
}

pub fn issue_token(
	user: &User,
	secret: &[u8],
	ttl_minutes: i64,
) -> Result<String, ServiceError> {
	let claims = SessionClaims {
		user_id: user.id,
		username: user.username.clone(),
		exp: (chrono::Utc::now() + chrono::Duration::minutes(ttl_minutes)).timestamp().max(0) as usize,
	};

	Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?)
}

pub fn verify_token(
	token: &str,
	secret: &[u8],
) -> Result<SessionClaims, ServiceError> {
	let validation = Validation::default();
	Ok(decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation).map(|token_data| token_data.claims)?)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
	let mut cookie = Cookie::new(SESSION_COOKIE, token);
	cookie.set_path("/");
	cookie.set_http_only(true);
	cookie
}

/// Cookie matching [`session_cookie`] by name and path, for removal from the jar.
pub fn expired_session_cookie() -> Cookie<'static> {
	let mut cookie = Cookie::new(SESSION_COOKIE, "");
	cookie.set_path("/");
	cookie
}

/// Who is making the request, if anyone.
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<SessionClaims>);

impl Session {
	pub fn username(&self) -> Option<&str> {
		self.0.as_ref().map(|claims| claims.username.as_str())
	}
}

/// Verifies the session cookie and stores the outcome as a [`Session`] extension.
pub async fn set_session<B>(
	State(state): State<AppState>,
	mut request: Request<B>,
	next: Next<B>,
) -> Response {
	let jar = CookieJar::from_headers(request.headers());

	let session = match jar.get(SESSION_COOKIE) {
		None => Session(None),
		Some(cookie) => match verify_token(cookie.value(), state.config.secret_key.as_bytes()) {
			Ok(claims) => Session(Some(claims)),
			Err(err) => {
				tracing::debug!("Rejected session cookie: {}", err);
				Session(None)
			}
		},
	};

	request.extensions_mut().insert(session);
	next.run(request).await
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
	}
}

/// Extractor for routes that need a logged-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
	type Rejection = ServiceError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let Session(claims) = Session::from_request_parts(parts, state).await.unwrap_or_default();
		claims.map(CurrentUser).ok_or(ServiceError::Unauthorized)
	}
}
