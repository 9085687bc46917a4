//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, CatalogService, IdentityService};
use crate::domain::CacheStore;
use crate::interfaces::http::common::{ApiResponse, MessageDto, PaginatedResponse};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{http_metrics_middleware, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, bookings, health, hotels, metrics, rooms, users};

/// Everything the router needs from the composition root.
#[derive(Clone)]
pub struct ApiDependencies {
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService>,
    pub db: DatabaseConnection,
    pub cache: Arc<dyn CacheStore>,
    pub metrics: PrometheusHandle,
}

/// Single router state; each handler picks its own slice through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    deps: ApiDependencies,
    started_at: Arc<Instant>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            identity: Arc::clone(&s.deps.identity),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            identity: Arc::clone(&s.deps.identity),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            identity: Arc::clone(&s.deps.identity),
        }
    }
}

impl FromRef<AppState> for hotels::CatalogHandlerState {
    fn from_ref(s: &AppState) -> Self {
        hotels::CatalogHandlerState {
            catalog: Arc::clone(&s.deps.catalog),
        }
    }
}

impl FromRef<AppState> for rooms::RoomHandlerState {
    fn from_ref(s: &AppState) -> Self {
        rooms::RoomHandlerState {
            catalog: Arc::clone(&s.deps.catalog),
            bookings: Arc::clone(&s.deps.bookings),
        }
    }
}

impl FromRef<AppState> for bookings::BookingHandlerState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingHandlerState {
            bookings: Arc::clone(&s.deps.bookings),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.deps.db.clone(),
            cache: Arc::clone(&s.deps.cache),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        MetricsState {
            handle: s.deps.metrics.clone(),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Api-Token"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        metrics::prometheus_metrics,
        auth::login,
        auth::register,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::list_users,
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::get_hotel_rooms,
        hotels::create_hotel,
        hotels::update_hotel,
        rooms::list_rooms,
        rooms::book_room,
        rooms::create_room,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::all_bookings,
    ),
    components(
        schemas(
            ApiResponse<String>,
            MessageDto,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<hotels::HotelDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            users::UserDto,
            users::UpdateUserRequest,
            hotels::HotelDto,
            hotels::CreateHotelRequest,
            hotels::UpdateHotelRequest,
            rooms::RoomDto,
            rooms::CreateRoomRequest,
            rooms::BookRoomRequest,
            bookings::BookingDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and Prometheus metrics"),
        (name = "Authentication", description = "Login (JWT) and registration"),
        (name = "Users", description = "Account self-service"),
        (name = "Hotels", description = "Hotel catalog"),
        (name = "Rooms", description = "Rooms and booking"),
        (name = "Bookings", description = "Viewing and canceling bookings"),
        (name = "Admin", description = "Administrator-only maintenance"),
    ),
    info(
        title = "Hotel Reservation API",
        version = "1.0.0",
        description = "REST API for browsing hotels and booking rooms",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn create_api_router(deps: ApiDependencies) -> Router {
    let state = AppState {
        deps,
        started_at: Arc::new(Instant::now()),
    };
    let auth_state = AuthState::from_ref(&state);

    let public_routes = Router::new()
        .route("/auth", post(auth::login))
        .route("/user", post(auth::register));

    let protected_routes = Router::new()
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/hotel", get(hotels::list_hotels))
        .route("/hotel/{id}", get(hotels::get_hotel))
        .route("/hotel/{id}/rooms", get(hotels::get_hotel_rooms))
        .route("/room", get(rooms::list_rooms))
        .route("/room/{id}/book", post(rooms::book_room))
        .route("/booking", get(bookings::my_bookings))
        .route("/booking/{id}", get(bookings::get_booking))
        .route("/booking/{id}/cancel", post(bookings::cancel_booking))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    // layers run bottom-up: auth first, then the admin check
    let admin_routes = Router::new()
        .route("/user", get(users::list_users))
        .route("/hotel", post(hotels::create_hotel))
        .route("/hotel/{id}", put(hotels::update_hotel))
        .route("/room", post(rooms::create_room))
        .route("/booking", get(bookings::all_bookings))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api_v1 = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest("/admin", admin_routes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .nest("/api/v1", api_v1)
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
