pub mod projects;

use std::sync::Arc;

use axum::middleware;
use axum::Extension;
use axum::Router;
use common::config::Config;
use common::http::print_request_response;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::PlatformProvider;

pub fn attach_routes(mut router: Router, platform: &Arc<PlatformProvider>, cfg: &Config) -> Router {
    router = projects::attach_routes(router);

    debug!("serving static assets from {:?}", cfg.data.ui_path);
    router = router.fallback_service(ServeDir::new(&cfg.data.ui_path));

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(Extension(platform.projects.clone()))
            .layer(middleware::from_fn(print_request_response)),
    )
}
