//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse, WelcomeResponse};
use super::state::AppState;
use super::v1::{
    self, AppointmentRequest, AppointmentResponse, CreatedResponse, ErrorResponse,
    MutationResponse,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agenda API",
        version = "0.1.0",
        description = "Appointment scheduling records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::root,
        handlers::health,
        v1::list_appointments,
        v1::get_appointment,
        v1::search_appointment,
        v1::list_appointments_in_range,
        v1::create_appointment,
        v1::update_appointment,
        v1::delete_appointment,
    ),
    components(
        schemas(
            WelcomeResponse,
            HealthResponse,
            AppointmentResponse,
            AppointmentRequest,
            CreatedResponse,
            MutationResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "agenda", description = "Appointment management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router, optionally serving OpenAPI docs at /docs
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    // Static segments take priority over {id}
    let agenda_routes = routes!(D => {
        get "/api/v1/agenda" => v1::list_appointments,
        post "/api/v1/agenda" => v1::create_appointment,
        get "/api/v1/agenda/search" => v1::search_appointment,
        get "/api/v1/agenda/range" => v1::list_appointments_in_range,
        get "/api/v1/agenda/{id}" => v1::get_appointment,
        put "/api/v1/agenda/{id}" => v1::update_appointment,
        delete "/api/v1/agenda/{id}" => v1::delete_appointment,
    });

    let router = system_routes.merge(agenda_routes);

    let router = if enable_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state)
}
