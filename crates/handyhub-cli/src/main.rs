//! `handyhub` — command-line client for the handyhub marketplace API.
//!
//! # Usage
//!
//! ```
//! handyhub --url http://localhost:8080 --token … check /leads
//! handyhub contractors --category plumbing
//! handyhub review 6f1c… --rating 5 --comment "Fixed the leak"
//! handyhub requests create --category roofing --location Austin --description "Leaking skylight"
//! ```

mod commands;
mod settings;

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use handyhub_client::ApiClient;
use handyhub_core::{
  contractor::ContractorFilter,
  service_request::{NewServiceRequest, RequestStatus, ServiceRequestFilter},
  viewer::Role,
};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "handyhub", version, about = "Command-line client for the handyhub marketplace")]
struct Args {
  /// Path to a TOML config file (base_url, token, timeout_secs, [routes]).
  #[arg(short, long, value_name = "FILE", default_value = "handyhub.toml")]
  config: PathBuf,

  /// Base URL of the marketplace API (default: http://localhost:8080).
  #[arg(long, env = "HANDYHUB_URL")]
  url: Option<String>,

  /// Bearer token for the API.
  #[arg(long, env = "HANDYHUB_TOKEN", hide_env_values = true)]
  token: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Check whether the current viewer may open a page.
  Check {
    /// Page path, e.g. `/leads` or `/requests/new?category=roofing`.
    path: String,

    /// Require one of these roles instead of the route table's rule.
    #[arg(long = "role", value_name = "ROLE")]
    roles: Vec<Role>,

    /// Require an active subscription.
    #[arg(long)]
    subscription: bool,
  },

  /// List contractors.
  Contractors {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    location: Option<String>,
  },

  /// Review a contractor and show the refreshed rating.
  Review {
    contractor_id: Uuid,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: u8,

    #[arg(long)]
    comment: Option<String>,
  },

  /// Manage service requests.
  Requests {
    #[command(subcommand)]
    action: RequestsCommand,
  },
}

#[derive(Subcommand, Debug)]
enum RequestsCommand {
  List {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    status:   Option<RequestStatus>,
  },
  Create {
    #[arg(long)]
    category:    String,
    #[arg(long)]
    location:    String,
    #[arg(long)]
    description: String,
  },
  /// Change a request's status and/or description. At least one is required.
  #[command(group(
    ArgGroup::new("changes").required(true).multiple(true).args(["status", "description"])
  ))]
  Update {
    request_id:  Uuid,
    #[arg(long)]
    status:      Option<RequestStatus>,
    #[arg(long)]
    description: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let settings = Settings::load(&args.config)?.override_with(args.url, args.token);
  let api = Arc::new(ApiClient::new(settings.api_config())?);

  match args.command {
    Command::Check { path, roles, subscription } => {
      return commands::check(
        api,
        &settings.base_url,
        settings.routes,
        &path,
        roles,
        subscription,
      )
      .await;
    }
    Command::Contractors { category, location } => {
      commands::contractors(api, ContractorFilter { category, location }).await?;
    }
    Command::Review { contractor_id, rating, comment } => {
      commands::review(api, contractor_id, rating, comment).await?;
    }
    Command::Requests { action } => match action {
      RequestsCommand::List { category, status } => {
        let filter = ServiceRequestFilter { category, status, customer_id: None };
        commands::list_requests(api, filter).await?;
      }
      RequestsCommand::Create { category, location, description } => {
        let request = NewServiceRequest { category, description, location };
        commands::create_request(api, request).await?;
      }
      RequestsCommand::Update { request_id, status, description } => {
        commands::update_request(api, request_id, status, description).await?;
      }
    },
  }

  Ok(ExitCode::SUCCESS)
}
