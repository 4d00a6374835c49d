use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
	dependencies::AppState,
	services::{
		handlers::SearchHandler,
		response::{ServiceError, ServiceResponse},
	},
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
	#[serde(default)]
	pub q: String,
	pub filter: Option<String>,
}

pub async fn search_posts(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<ServiceResponse, ServiceError> {
	let filter = params.filter.as_deref().unwrap_or("all");
	Ok(SearchHandler::search(&params.q, filter, &state.store).await?.into())
}
