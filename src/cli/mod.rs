pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod utils_test;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use commands::appointment::{self, AppointmentRequest};
use error::CliResult;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(author, version, about = "Appointment scheduling CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: AGENDA_API_URL env or http://localhost:3000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every record command
#[derive(Args)]
struct Target {
    /// Target table (agenda or agenda_test)
    #[arg(long)]
    table: Option<String>,
}

/// Output options for read commands
#[derive(Args)]
struct Output {
    /// Output format (table or json)
    #[arg(long, default_value = "table")]
    format: String,
}

/// Appointment fields; every field is required on create and update
#[derive(Args)]
struct AppointmentFields {
    /// Person name
    #[arg(long)]
    name: String,
    /// Phone contact (at least 10 characters)
    #[arg(long)]
    phone: String,
    /// Email address
    #[arg(long)]
    email: String,
    /// Appointment date (DD/MM/YYYY)
    #[arg(long)]
    date: String,
}

impl From<AppointmentFields> for AppointmentRequest {
    fn from(fields: AppointmentFields) -> Self {
        Self {
            person_name: fields.name,
            phone_contact: fields.phone,
            email: fields.email,
            appointment_date: fields.date,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Api {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Database file path (default: AGENDA_DB env or ~/.local/share/agenda/agenda.db)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
        /// Disable the OpenAPI documentation UI at /docs
        #[arg(long)]
        no_docs: bool,
    },
    /// List all appointments
    List {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        output: Output,
    },
    /// Get an appointment by ID
    Get {
        /// Appointment ID
        id: i64,
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        output: Output,
    },
    /// Find the first appointment for a person name
    Search {
        /// Exact person name
        name: String,
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        output: Output,
    },
    /// List appointments between two dates (YYYY-MM-DD, inclusive)
    Range {
        start: String,
        end: String,
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        output: Output,
    },
    /// Create an appointment
    Create {
        #[command(flatten)]
        fields: AppointmentFields,
        #[command(flatten)]
        target: Target,
    },
    /// Replace every field of an appointment
    Update {
        /// Appointment ID
        id: i64,
        #[command(flatten)]
        fields: AppointmentFields,
        #[command(flatten)]
        target: Target,
    },
    /// Delete an appointment
    Delete {
        /// Appointment ID
        id: i64,
        #[command(flatten)]
        target: Target,
    },
}

pub async fn run() -> miette::Result<()> {
    // reqwest is built without a default TLS provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["agenda", "--help"]);
        return Ok(());
    };

    let output: CliResult<String> = match command {
        Commands::Api {
            host,
            port,
            db,
            verbose,
            no_docs,
        } => {
            commands::api::run(host, port, db, verbose, !no_docs).await?;
            return Ok(());
        }
        Commands::List { target, output } => {
            appointment::list_appointments(&api_client, target.table.as_deref(), &output.format)
                .await
        }
        Commands::Get { id, target, output } => {
            appointment::get_appointment(&api_client, id, target.table.as_deref(), &output.format)
                .await
        }
        Commands::Search {
            name,
            target,
            output,
        } => {
            appointment::search_appointment(
                &api_client,
                &name,
                target.table.as_deref(),
                &output.format,
            )
            .await
        }
        Commands::Range {
            start,
            end,
            target,
            output,
        } => {
            appointment::list_appointments_in_range(
                &api_client,
                &start,
                &end,
                target.table.as_deref(),
                &output.format,
            )
            .await
        }
        Commands::Create { fields, target } => {
            appointment::create_appointment(&api_client, fields.into(), target.table.as_deref())
                .await
        }
        Commands::Update { id, fields, target } => {
            appointment::update_appointment(
                &api_client,
                id,
                fields.into(),
                target.table.as_deref(),
            )
            .await
        }
        Commands::Delete { id, target } => {
            appointment::delete_appointment(&api_client, id, target.table.as_deref()).await
        }
    };

    println!("{}", output?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_command() {
        let cli = Cli::try_parse_from([
            "agenda",
            "create",
            "--name",
            "William Carvalho",
            "--phone",
            "75991826988",
            "--email",
            "willcarvalho@gmail.com",
            "--date",
            "07/10/2024",
            "--table",
            "agenda_test",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Create { fields, target }) => {
                assert_eq!(fields.name, "William Carvalho");
                assert_eq!(fields.date, "07/10/2024");
                assert_eq!(target.table.as_deref(), Some("agenda_test"));
            }
            _ => panic!("expected create command"),
        }
    }

    #[test]
    fn test_parse_api_defaults() {
        let cli = Cli::try_parse_from(["agenda", "api"]).unwrap();
        match cli.command {
            Some(Commands::Api {
                host,
                port,
                db,
                verbose,
                no_docs,
            }) => {
                assert_eq!(host.to_string(), "0.0.0.0");
                assert_eq!(port, 3000);
                assert!(db.is_none());
                assert_eq!(verbose, 0);
                assert!(!no_docs);
            }
            _ => panic!("expected api command"),
        }
    }

    #[test]
    fn test_create_requires_every_field() {
        let result = Cli::try_parse_from(["agenda", "create", "--name", "Ana"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_api_url() {
        let cli =
            Cli::try_parse_from(["agenda", "list", "--api-url", "http://other:4000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://other:4000"));
    }
}
