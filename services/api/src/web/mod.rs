pub mod auth;
pub mod extract;
pub mod middleware;
pub mod rest;
pub mod state;

pub use middleware::{require_admin, require_auth};
pub use state::AppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{current_user_handler, login_handler, register_handler};
use rest::{
    get_course_handler, health_handler, list_courses_handler, list_purchases_handler,
    purchase_handler, stats_handler, ApiDoc,
};

/// Builds the complete application: API routes, auth layers, CORS, request
/// tracing and the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let allow_origin = match &app_state.config.cors_allow_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(health_handler))
        .route("/api/cursos", get(list_courses_handler))
        .route("/api/cursos/{id}", get(get_course_handler))
        .route("/api/auth/cadastro", post(register_handler))
        .route("/api/auth/login", post(login_handler));

    // Admin routes; `require_auth` below runs first and supplies the user.
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(stats_handler))
        .route_layer(axum_middleware::from_fn(require_admin));

    // Protected routes (token required)
    let protected_routes = Router::new()
        .route("/api/usuario", get(current_user_handler))
        .route(
            "/api/compras",
            get(list_purchases_handler).post(purchase_handler),
        )
        .merge(admin_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
