use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use gymdesk_db::{ApiClient, Connection};
use gymdesk_status::datetime;

use crate::commands::{Context, Invoice, Members, Plans, Stats};
use crate::settings::{Settings, DEFAULT_API_URL};

#[derive(Parser, Debug)]
#[clap(name = "gymdesk", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Settings file
    #[clap(long, default_value = "gymdesk.toml")]
    pub config: String,

    /// Base URL of the membership backend
    #[clap(long, env = "GYMDESK_API_URL")]
    pub api_url: Option<String>,

    /// Work on a local membership database instead of the backend
    #[clap(long, env = "GYMDESK_MEMBERS_DB")]
    pub members_db: Option<String>,

    /// Evaluate statuses as of this date instead of today
    #[clap(long)]
    pub today: Option<NaiveDate>,

    #[clap(subcommand)]
    pub command: Command,
}

/// Where memberships are read from and written to.
pub enum Backend {
    Api(ApiClient),
    Local(Connection),
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    /// Clock and thresholds shared by all commands of this run.
    pub fn context(&self, settings: &Settings) -> Context {
        Context {
            today: self.today.unwrap_or_else(datetime::today),
            policy: settings.policy(),
        }
    }

    /// Pick the backend: flags win over settings, a local database
    /// wins over a backend URL at the same level, and the REST
    /// backend is the default.
    pub async fn backend(&self, settings: &Settings) -> Result<Backend> {
        if let Some(path) = &self.members_db {
            log::info!("using local membership database {}", path);
            return Ok(Backend::Local(Connection::open(path).await?));
        }
        if let Some(url) = &self.api_url {
            return Ok(Backend::Api(ApiClient::new(url)));
        }
        if let Some(path) = &settings.members_db {
            log::info!("using local membership database {}", path);
            return Ok(Backend::Local(Connection::open(path).await?));
        }
        let url = settings.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        log::info!("using membership backend at {}", url);
        Ok(Backend::Api(ApiClient::new(url)))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage memberships
    #[clap(subcommand)]
    Members(Members),

    /// Show membership statistics
    #[clap(name = "stats")]
    Stats(Stats),

    /// Print the invoice of a membership
    #[clap(name = "invoice")]
    Invoice(Invoice),

    /// Membership plans
    #[clap(subcommand)]
    Plans(Plans),
}
