use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

const BASE_PATH: &str = "/api/v1/agenda";

/// Request body for create and update (full replacement)
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRequest {
    #[serde(rename = "nomePessoa")]
    pub person_name: String,
    #[serde(rename = "contatoTelefonico")]
    pub phone_contact: String,
    pub email: String,
    /// DD/MM/YYYY
    #[serde(rename = "dataAgendamento")]
    pub appointment_date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Appointment {
    pub id_agenda: i64,
    pub nome_pessoa: String,
    pub contato_telefonico: String,
    pub email: String,
    pub data_agendamento: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    rows_affected: u64,
}

#[derive(Tabled)]
struct AppointmentDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Appointment> for AppointmentDisplay {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id_agenda,
            name: truncate_with_ellipsis(&appointment.nome_pessoa, 40),
            phone: appointment.contato_telefonico.clone(),
            email: truncate_with_ellipsis(&appointment.email, 40),
            date: appointment.data_agendamento.clone(),
        }
    }
}

fn with_table(request: RequestBuilder, table: Option<&str>) -> RequestBuilder {
    match table {
        Some(t) => request.query(&[("table", t)]),
        None => request,
    }
}

/// List all appointments
pub async fn list_appointments(
    api_client: &ApiClient,
    table: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let response = with_table(api_client.get(BASE_PATH), table).send().await?;
    let appointments = many_or_empty(response).await?;
    format_many(&appointments, format)
}

/// List appointments between two ISO dates (inclusive)
pub async fn list_appointments_in_range(
    api_client: &ApiClient,
    start: &str,
    end: &str,
    table: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let request = api_client
        .get(&format!("{}/range", BASE_PATH))
        .query(&[("start", start), ("end", end)]);
    let response = with_table(request, table).send().await?;
    let appointments = many_or_empty(response).await?;
    format_many(&appointments, format)
}

/// Get a single appointment by ID
pub async fn get_appointment(
    api_client: &ApiClient,
    id: i64,
    table: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let request = api_client.get(&format!("{}/{}", BASE_PATH, id));
    let response = with_table(request, table).send().await?;
    let appointment: Appointment = ApiClient::handle_response(response).await?;
    format_one(&appointment, format)
}

/// Get the first appointment whose person name matches exactly
pub async fn search_appointment(
    api_client: &ApiClient,
    name: &str,
    table: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let request = api_client
        .get(&format!("{}/search", BASE_PATH))
        .query(&[("name", name)]);
    let response = with_table(request, table).send().await?;
    let appointment: Appointment = ApiClient::handle_response(response).await?;
    format_one(&appointment, format)
}

/// Create a new appointment
pub async fn create_appointment(
    api_client: &ApiClient,
    request: AppointmentRequest,
    table: Option<&str>,
) -> CliResult<String> {
    let response = with_table(api_client.post(BASE_PATH), table)
        .json(&request)
        .send()
        .await?;

    let created: CreatedResponse = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Created appointment: {} ({})",
        request.person_name, created.id
    ))
}

/// Replace every field of an existing appointment
pub async fn update_appointment(
    api_client: &ApiClient,
    id: i64,
    request: AppointmentRequest,
    table: Option<&str>,
) -> CliResult<String> {
    let response = with_table(api_client.put(&format!("{}/{}", BASE_PATH, id)), table)
        .json(&request)
        .send()
        .await?;

    let outcome: MutationResponse = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Updated appointment: {} ({} row(s) affected)",
        id, outcome.rows_affected
    ))
}

/// Delete an appointment
pub async fn delete_appointment(
    api_client: &ApiClient,
    id: i64,
    table: Option<&str>,
) -> CliResult<String> {
    let response = with_table(api_client.delete(&format!("{}/{}", BASE_PATH, id)), table)
        .send()
        .await?;

    let _: MutationResponse = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Deleted appointment: {}", id))
}

/// The server answers 404 for an empty result set.
async fn many_or_empty(response: reqwest::Response) -> CliResult<Vec<Appointment>> {
    match ApiClient::handle_response(response).await {
        Err(CliError::ApiError { status: 404, .. }) => Ok(Vec::new()),
        other => other,
    }
}

fn format_many(appointments: &[Appointment], format: &str) -> CliResult<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(appointments)?),
        _ => Ok(format_table(appointments)),
    }
}

fn format_one(appointment: &Appointment, format: &str) -> CliResult<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(appointment)?),
        _ => Ok(format_appointment_detail(appointment)),
    }
}

fn format_table(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "No appointments found.".to_string();
    }

    let display: Vec<AppointmentDisplay> = appointments.iter().map(|a| a.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

fn format_appointment_detail(appointment: &Appointment) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();

    builder.push_record(["Appointment ID", &appointment.id_agenda.to_string()]);
    builder.push_record(["Name", &appointment.nome_pessoa]);
    builder.push_record(["Phone", &appointment.contato_telefonico]);
    builder.push_record(["Email", &appointment.email]);
    builder.push_record(["Date", &appointment.data_agendamento]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
