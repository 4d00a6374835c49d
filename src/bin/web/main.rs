use std::{net::SocketAddr, str::FromStr};

use axum::http::{HeaderValue, Method};

use blog::{bootstrap::Bootstrap, config::Config, create_routes};
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	trace::TraceLayer,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
	println!("Environment Variable Is Being Set...");
	let config = Config::new().unwrap_or_else(|err| panic!("{}", err));

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("blog={},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	let origins = config
		.allow_origins
		.split(',')
		.filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
		.collect::<Vec<_>>();
	let address = SocketAddr::from_str(&config.server_ip_port).unwrap_or_else(|err| panic!("Invalid SERVER_IP_PORT {}: {}", config.server_ip_port, err));

	// ! Storage
	let state = Bootstrap::app_state(config).await.unwrap_or_else(|err| panic!("{}", err));

	let app = create_routes(state)
		.layer(
			CorsLayer::new()
				.allow_origin(AllowOrigin::list(origins))
				.allow_methods([Method::GET, Method::POST]),
		)
		.layer(TraceLayer::new_for_http());

	tracing::info!("Start Web Server on {}", address);
	axum::Server::bind(&address)
		.serve(app.into_make_service())
		.await
		.unwrap_or_else(|err| panic!("Server error: {}", err));
}
