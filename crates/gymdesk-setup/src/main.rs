use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
};

use gymdesk_db::Connection;

#[derive(Parser, Debug)]
#[clap(name="gymdesk-setup")]
struct Cli {
    #[clap(default_value="gym.db")]
    pub members_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and install the schema
    Init,
}

/// Initialize the database
async fn db_init(filename: &str) -> Result<()> {
    Connection::create(filename).await?;
    log::info!("membership database ready at {}", filename);
    Ok(())
}

fn init_logging() -> Result<()> {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Init => db_init(&cli.members_db).await?,
    }
    Ok(())
}
