use anyhow::Result;

use gymdesk_cli::cli::{Backend, Cli};
use gymdesk_cli::{logging, settings::Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();
    let settings = Settings::load(&cli.config)?;
    logging::init(&settings)?;

    let ctx = cli.context(&settings);
    log::debug!("running with today = {}", ctx.today);

    let backend = cli.backend(&settings).await?;
    match backend {
        Backend::Api(api) => cli.command.run(&api, &ctx).await,
        Backend::Local(conn) => cli.command.run(&conn, &ctx).await,
    }?;

    Ok(())
}
