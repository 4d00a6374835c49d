use crate::{common::session::Session, services::response::ServiceResponse};

pub async fn index(session: Session) -> ServiceResponse {
	ServiceResponse::Home {
		username: session.username().map(ToString::to_string),
	}
}
