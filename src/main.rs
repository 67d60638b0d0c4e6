mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use freight_gateway::api::types::{CreateShipmentRequest, UserRole};
use freight_gateway::api::{ApiClient, Envelope};
use freight_gateway::config::Config;
use freight_gateway::token::{KeyringTokenStore, StaticTokenStore, TokenStore};

#[derive(Parser, Debug)]
#[command(name = "freight-gateway", version, about = "Freight marketplace API client")]
struct Cli {
    /// Backend base URL (overrides FREIGHT_API_URL / API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        name: String,
    },
    /// Log in and optionally keep the session token in the keychain
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        save: bool,
    },
    /// Remove the stored session token
    Logout,
    #[command(subcommand)]
    Shipments(ShipmentCommand),
    #[command(subcommand)]
    Bids(BidCommand),
    /// Seed the development database
    Seed,
}

#[derive(Subcommand, Debug)]
enum ShipmentCommand {
    List,
    Create {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        pallets: u32,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        load_type: String,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        pickup_date: Option<String>,
        #[arg(long)]
        delivery_date: Option<String>,
        /// Explicit `true` or `false`; omitted from the request when unset
        #[arg(long)]
        urgent: Option<bool>,
        #[arg(long)]
        payment_terms: Option<String>,
    },
    Status {
        id: String,
        status: String,
    },
}

#[derive(Subcommand, Debug)]
enum BidCommand {
    Create {
        #[arg(long)]
        shipment_id: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        message: Option<String>,
    },
    Accept {
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Shipper,
    Driver,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Shipper => UserRole::Shipper,
            RoleArg::Driver => UserRole::Driver,
            RoleArg::Admin => UserRole::Admin,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    let config = match Config::from_env(cli.api_url) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let keychain = KeyringTokenStore::default();
    let tokens: Arc<dyn TokenStore> = match config.token {
        Some(ref t) => Arc::new(StaticTokenStore::new(t.clone())),
        None => Arc::new(keychain.clone()),
    };

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.timeout {
        http = http.timeout(timeout);
    }
    let http = match http.build() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let api = ApiClient::with_http_client(http, &config.api_base_url, tokens);
    log::debug!("Using API at {}", api.base_url());

    let envelope: Envelope<Value> = match cli.command {
        Command::Register {
            email,
            password,
            role,
            name,
        } => commands::register(&api, email, password, role.into(), name).await,
        Command::Login {
            email,
            password,
            save,
        } => commands::login(&api, &keychain, email, password, save).await,
        Command::Logout => match commands::logout(&keychain) {
            Ok(env) => env,
            Err(e) => {
                log::error!("Logout failed: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Command::Shipments(ShipmentCommand::List) => commands::list_shipments(&api).await,
        Command::Shipments(ShipmentCommand::Create {
            origin,
            destination,
            pallets,
            weight,
            load_type,
            rate,
            description,
            pickup_date,
            delivery_date,
            urgent,
            payment_terms,
        }) => {
            let mut req =
                CreateShipmentRequest::new(origin, destination, pallets, weight, load_type, rate);
            req.description = description;
            req.pickup_date = pickup_date;
            req.delivery_date = delivery_date;
            req.payment_terms = payment_terms;
            req.is_urgent = urgent;
            commands::create_shipment(&api, req).await
        }
        Command::Shipments(ShipmentCommand::Status { id, status }) => {
            commands::update_shipment_status(&api, &id, status).await
        }
        Command::Bids(BidCommand::Create {
            shipment_id,
            amount,
            message,
        }) => commands::create_bid(&api, shipment_id, amount, message).await,
        Command::Bids(BidCommand::Accept { id }) => commands::accept_bid(&api, &id).await,
        Command::Seed => commands::seed(&api).await,
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            log::error!("Failed to render response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_urgent(extra: &[&str]) -> Option<bool> {
        let mut args = vec![
            "freight-gateway", "shipments", "create", "--origin", "A", "--destination", "B",
            "--pallets", "2", "--weight", "100", "--load-type", "dry", "--rate", "50",
        ];
        args.extend_from_slice(extra);
        match Cli::try_parse_from(args).unwrap().command {
            Command::Shipments(ShipmentCommand::Create { urgent, .. }) => urgent,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_urgent_flag_is_tri_state() {
        assert_eq!(parse_urgent(&[]), None);
        assert_eq!(parse_urgent(&["--urgent", "true"]), Some(true));
        assert_eq!(parse_urgent(&["--urgent", "false"]), Some(false));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
