use anyhow::Result;
use clap::Args;

use gymdesk_data::{Membership, MembershipFilter, MembershipStore};
use gymdesk_status::stats;

use crate::commands::{Context, Snapshot};
use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct Stats {}

impl Stats {
    /// Show the dashboard statistics of all memberships
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let members: Vec<Membership> = db.query(&MembershipFilter::default()).await?;
        let snapshot = Snapshot::classify(&members, ctx);
        let stats = stats::tally(snapshot.classified.iter().copied(), &ctx.policy);
        println!("Statistics as of {}", ctx.today);
        println!();
        stats.print_formatted();
        if !snapshot.malformed.is_empty() {
            println!();
            snapshot.malformed.print_formatted();
        }
        Ok(())
    }
}
