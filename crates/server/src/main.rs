mod auth;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use crate::auth::RailwayClaims;
use crate::routes::{crew, health, order, route, station, train, train_type, trip};
use crate::utils::shutdown::shutdown_signal;
use axum::Router;
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let issuer_url = std::env::var("OIDC_ISSUER_URL").expect("OIDC_ISSUER_URL must be set");
    let oauth2_resource_server = OAuth2ResourceServer::<RailwayClaims>::builder()
        .issuer_url(issuer_url.as_str())
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    // Everything under /api/railway requires a valid bearer token; role and
    // ownership checks happen inside the handlers.
    let (protected, protected_api) = OpenApiRouter::new()
        .routes(routes!(station::list_stations, station::create_station))
        .routes(routes!(
            station::get_station,
            station::update_station,
            station::delete_station
        ))
        .routes(routes!(route::list_routes, route::create_route))
        .routes(routes!(
            route::get_route,
            route::update_route,
            route::delete_route
        ))
        .routes(routes!(crew::list_crews, crew::create_crew))
        .routes(routes!(crew::get_crew, crew::update_crew, crew::delete_crew))
        .routes(routes!(
            train_type::list_train_types,
            train_type::create_train_type
        ))
        .routes(routes!(
            train_type::get_train_type,
            train_type::update_train_type,
            train_type::delete_train_type
        ))
        .routes(routes!(train::list_trains, train::create_train))
        .routes(routes!(
            train::get_train,
            train::update_train,
            train::delete_train
        ))
        .routes(routes!(train::upload_train_image))
        .routes(routes!(trip::list_trips, trip::create_trip))
        .routes(routes!(trip::get_trip, trip::update_trip, trip::delete_trip))
        .routes(routes!(order::list_orders, order::create_order))
        .routes(routes!(order::get_order, order::delete_order))
        .split_for_parts();

    let (public, mut api) = OpenApiRouter::with_openapi(doc::ApiDoc::openapi())
        .routes(routes!(health::health))
        .split_for_parts();
    api.merge(protected_api);

    let app = Router::new()
        .merge(public)
        .merge(
            protected.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer())),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new());

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_owned());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
