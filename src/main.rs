use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microlearn::api::HttpLearnApi;
use microlearn::session::SessionStore;
use microlearn::state::AppState;
use microlearn::{config, handlers};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "microlearn=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load_settings();

  let api = HttpLearnApi::new(&settings.api_base).expect("Failed to build API client");
  let state = AppState::new(Arc::new(api), SessionStore::new(settings.session_expiry_hours));
  let app = handlers::router(state);

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.server_port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
