//! Appointment handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::validation::{parse_id, parse_iso_date};
use crate::db::{
    AgendaTable, Appointment, AppointmentInput, AppointmentRepository, CreatedAppointment,
    Database, DbError, MutationOutcome,
};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Appointment response DTO
///
/// Field names follow the persisted columns.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    #[schema(example = 1)]
    pub id_agenda: i64,
    #[schema(example = "William Carvalho")]
    pub nome_pessoa: String,
    #[schema(example = "75991826988")]
    pub contato_telefonico: String,
    #[schema(example = "willcarvalho@gmail.com")]
    pub email: String,
    /// Appointment date (yyyy-MM-dd)
    #[schema(value_type = String, format = Date, example = "2024-10-07")]
    pub data_agendamento: NaiveDate,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id_agenda: a.id,
            nome_pessoa: a.person_name,
            contato_telefonico: a.phone_contact,
            email: a.email,
            data_agendamento: a.appointment_date,
        }
    }
}

/// Create/update appointment request DTO
///
/// Every field is optional here so that missing fields are reported by
/// validation with a readable message.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRequest {
    #[serde(rename = "nomePessoa")]
    #[schema(example = "William Carvalho")]
    pub nome_pessoa: Option<String>,
    #[serde(rename = "contatoTelefonico")]
    #[schema(example = "75991826988")]
    pub contato_telefonico: Option<String>,
    #[schema(example = "willcarvalho@gmail.com")]
    pub email: Option<String>,
    /// Appointment date (dd/MM/yyyy)
    #[serde(rename = "dataAgendamento")]
    #[schema(example = "07/10/2024")]
    pub data_agendamento: Option<String>,
}

impl From<AppointmentRequest> for AppointmentInput {
    fn from(req: AppointmentRequest) -> Self {
        Self {
            person_name: req.nome_pessoa,
            phone_contact: req.contato_telefonico,
            email: req.email,
            appointment_date: req.data_agendamento,
        }
    }
}

/// Create response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "created")]
    pub message: String,
}

impl From<CreatedAppointment> for CreatedResponse {
    fn from(c: CreatedAppointment) -> Self {
        Self {
            id: c.id,
            message: c.message,
        }
    }
}

/// Update/delete response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    #[schema(example = "updated")]
    pub message: String,
    #[schema(example = 1)]
    pub rows_affected: u64,
}

impl From<MutationOutcome> for MutationResponse {
    fn from(m: MutationOutcome) -> Self {
        Self {
            message: m.message,
            rows_affected: m.rows_affected,
        }
    }
}

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "No appointment found with ID: 42")]
    pub error: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TableQuery {
    /// Target table (agenda, agenda_test)
    #[param(example = "agenda")]
    pub table: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact person name
    #[param(example = "William Carvalho")]
    pub name: Option<String>,
    /// Target table (agenda, agenda_test)
    #[param(example = "agenda")]
    pub table: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    /// First day of the range, inclusive (yyyy-MM-dd)
    #[param(example = "2024-10-01")]
    pub start: Option<String>,
    /// Last day of the range, inclusive (yyyy-MM-dd)
    #[param(example = "2024-10-31")]
    pub end: Option<String>,
    /// Target table (agenda, agenda_test)
    #[param(example = "agenda")]
    pub table: Option<String>,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// =============================================================================
// Handlers
// =============================================================================

/// List all appointments
#[utoipa::path(
    get,
    path = "/api/v1/agenda",
    tag = "agenda",
    params(TableQuery),
    responses(
        (status = 200, description = "All appointments", body = Vec<AppointmentResponse>),
        (status = 400, description = "Unknown table", body = ErrorResponse),
        (status = 404, description = "No appointments", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_appointments<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<TableQuery>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let table = resolve_table(query.table.as_deref())?;

    let rows = state
        .db()
        .appointments(table)
        .list()
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("No appointments found".to_string()))?;

    Ok(Json(rows.into_iter().map(AppointmentResponse::from).collect()))
}

/// Get an appointment by ID
#[utoipa::path(
    get,
    path = "/api/v1/agenda/{id}",
    tag = "agenda",
    params(
        ("id" = String, Path, description = "Appointment ID (positive integer)"),
        TableQuery
    ),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentResponse),
        (status = 400, description = "Invalid ID or table", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_appointment<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> ApiResult<Json<AppointmentResponse>> {
    let table = resolve_table(query.table.as_deref())?;
    let id = parse_id(&id).map_err(error_response)?;

    let appointment = state
        .db()
        .appointments(table)
        .get(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found(format!("No appointment found with ID: {}", id)))?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

/// Find an appointment by exact person name
#[utoipa::path(
    get,
    path = "/api/v1/agenda/search",
    tag = "agenda",
    params(SearchQuery),
    responses(
        (status = 200, description = "First matching appointment", body = AppointmentResponse),
        (status = 400, description = "Missing name or unknown table", body = ErrorResponse),
        (status = 404, description = "No appointment for this name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_appointment<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<AppointmentResponse>> {
    let table = resolve_table(query.table.as_deref())?;
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| error_response(DbError::invalid_input("name is required")))?;

    let appointment = state
        .db()
        .appointments(table)
        .get_by_name(&name)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found(format!("No appointment found for: {}", name)))?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

/// List appointments within a date range
///
/// Both bounds are inclusive. Results are ordered by date, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/agenda/range",
    tag = "agenda",
    params(RangeQuery),
    responses(
        (status = 200, description = "Appointments in range", body = Vec<AppointmentResponse>),
        (status = 400, description = "Invalid dates or table", body = ErrorResponse),
        (status = 404, description = "No appointments in range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_appointments_in_range<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let table = resolve_table(query.table.as_deref())?;
    let start = required_date(query.start.as_deref(), "start")?;
    let end = required_date(query.end.as_deref(), "end")?;

    let rows = state
        .db()
        .appointments(table)
        .list_by_date_range(start, end)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("No appointments found in range".to_string()))?;

    Ok(Json(rows.into_iter().map(AppointmentResponse::from).collect()))
}

/// Create a new appointment
#[utoipa::path(
    post,
    path = "/api/v1/agenda",
    tag = "agenda",
    params(TableQuery),
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_appointment<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<TableQuery>,
    Json(req): Json<AppointmentRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let table = resolve_table(query.table.as_deref())?;

    let created = state
        .db()
        .appointments(table)
        .create(&AppointmentInput::from(req))
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::from(created))))
}

/// Update an appointment
///
/// Replaces every field of an existing appointment.
#[utoipa::path(
    put,
    path = "/api/v1/agenda/{id}",
    tag = "agenda",
    params(
        ("id" = String, Path, description = "Appointment ID (positive integer)"),
        TableQuery
    ),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = MutationResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_appointment<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
    Json(req): Json<AppointmentRequest>,
) -> ApiResult<Json<MutationResponse>> {
    let table = resolve_table(query.table.as_deref())?;
    let id = parse_id(&id).map_err(error_response)?;

    let outcome = state
        .db()
        .appointments(table)
        .update(id, &AppointmentInput::from(req))
        .await
        .map_err(error_response)?;

    Ok(Json(MutationResponse::from(outcome)))
}

/// Delete an appointment
#[utoipa::path(
    delete,
    path = "/api/v1/agenda/{id}",
    tag = "agenda",
    params(
        ("id" = String, Path, description = "Appointment ID (positive integer)"),
        TableQuery
    ),
    responses(
        (status = 200, description = "Appointment deleted", body = MutationResponse),
        (status = 400, description = "Invalid ID or table", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_appointment<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> ApiResult<Json<MutationResponse>> {
    let table = resolve_table(query.table.as_deref())?;
    let id = parse_id(&id).map_err(error_response)?;

    let outcome = state
        .db()
        .appointments(table)
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(Json(MutationResponse::from(outcome)))
}

// =============================================================================
// Helpers
// =============================================================================

fn resolve_table(raw: Option<&str>) -> ApiResult<AgendaTable> {
    match raw {
        None => Ok(AgendaTable::default()),
        Some(name) => name.parse().map_err(error_response),
    }
}

fn required_date(raw: Option<&str>, name: &str) -> ApiResult<NaiveDate> {
    let raw = raw
        .ok_or_else(|| error_response(DbError::invalid_input(format!("{} is required", name))))?;
    parse_iso_date(raw).map_err(error_response)
}

fn not_found(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message }))
}

/// Map a database error to a response.
///
/// Caller faults echo their message. Storage faults are logged here and
/// answered with a generic message.
pub(crate) fn error_response(err: DbError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        DbError::InvalidInput { message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        ),
        DbError::NotFound { id, .. } => not_found(format!("No appointment found with ID: {}", id)),
        other => {
            error!(error = %other, "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database connection error".to_string(),
                }),
            )
        }
    }
}
