use axum::{extract::State, http::StatusCode, Form};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
	common::session::session_cookie,
	dependencies::AppState,
	services::{
		handlers::AuthHandler,
		response::{ServiceError, ServiceResponse},
	},
};

#[derive(Debug, Deserialize)]
pub struct Credentials {
	#[serde(default)]
	pub username: String,
	#[serde(default)]
	pub password: String,
}

pub async fn register(
	State(state): State<AppState>,
	Form(credentials): Form<Credentials>,
) -> Result<(StatusCode, ServiceResponse), ServiceError> {
	let user = AuthHandler::register(&credentials.username, &credentials.password, &state.store).await?;
	Ok((StatusCode::CREATED, user.into()))
}

pub async fn login(
	State(state): State<AppState>,
	jar: CookieJar,
	Form(credentials): Form<Credentials>,
) -> Result<(CookieJar, ServiceResponse), ServiceError> {
	let (user, token) = AuthHandler::login(&credentials.username, &credentials.password, &state.store, &state.config).await?;
	Ok((jar.add(session_cookie(token)), user.into()))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, ServiceResponse) {
	(AuthHandler::logout(jar), "Logged out".into())
}
