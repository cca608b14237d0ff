//! Operator CLI for partner accounts
//!
//! Moves partners between statuses and mints sign-in tokens for local use.
//! Outputs JSON, one object per invocation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use partner_core::common::{PartnerId, PartnerUserId};
use partner_core::config::Config;
use partner_core::domains::auth::JwtService;
use partner_core::domains::partners::models::{Partner, PartnerStatus, PartnerUser};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "partner_cli")]
#[command(about = "Partner account administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a partner
    CreatePartner {
        name: String,
        #[arg(long, default_value = "uninvited")]
        status: PartnerStatus,
    },

    /// Add a user to a partner
    AddUser {
        partner_id: PartnerId,
        email: String,
        #[arg(long)]
        name: Option<String>,
    },

    /// Change a partner's status (e.g. approved, deactivated)
    SetStatus {
        partner_id: PartnerId,
        status: PartnerStatus,
    },

    /// Print a 24h bearer token for a partner user
    Token { user_id: PartnerUserId },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partner: Option<Partner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<PartnerUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl Response {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
            partner: None,
            user: None,
            token: None,
        }
    }
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let result = run(cli.command, &config, &pool).await;
    match result {
        Ok(resp) => output(&resp),
        Err(e) => {
            output(&Response {
                success: false,
                message: Some(format!("{:#}", e)),
                ..Response::ok()
            })?;
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands, config: &Config, pool: &PgPool) -> Result<Response> {
    match command {
        Commands::CreatePartner { name, status } => {
            let partner = Partner::create(&name, status, pool).await?;
            tracing::info!(partner_id = %partner.id, %status, "Partner created");
            Ok(Response {
                partner: Some(partner),
                ..Response::ok()
            })
        }
        Commands::AddUser {
            partner_id,
            email,
            name,
        } => {
            Partner::find_by_id(partner_id, pool)
                .await
                .context("Partner not found")?;
            let user = PartnerUser::create(partner_id, &email, name.as_deref(), pool).await?;
            Ok(Response {
                user: Some(user),
                ..Response::ok()
            })
        }
        Commands::SetStatus { partner_id, status } => {
            let partner = Partner::update_status(partner_id, status, pool)
                .await
                .context("Failed to update partner status")?;
            tracing::info!(partner_id = %partner.id, %status, "Partner status changed");
            Ok(Response {
                partner: Some(partner),
                ..Response::ok()
            })
        }
        Commands::Token { user_id } => {
            let user = PartnerUser::find_by_id(user_id, pool)
                .await
                .context("Partner user not found")?;
            let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone());
            let token = jwt.create_token(
                user.id.into_uuid(),
                user.partner_id.into_uuid(),
                user.email.clone(),
            )?;
            Ok(Response {
                user: Some(user),
                token: Some(token),
                ..Response::ok()
            })
        }
    }
}
