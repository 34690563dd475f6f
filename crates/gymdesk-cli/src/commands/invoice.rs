use anyhow::Result;
use clap::Args;
use rand::Rng;

use gymdesk_data::{Membership, MembershipStore};
use gymdesk_status::invoice;

use crate::commands::Context;
use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct Invoice {
    #[clap(short, long)]
    pub id: u32,
    /// Invoice serial (0-999), random if omitted
    #[clap(short, long)]
    pub serial: Option<u16>,
}

impl Invoice {
    /// Print an invoice dated today
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let member: Membership = db.retrieve(self.id).await?;
        let serial = self
            .serial
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..1000));
        let invoice = invoice::Invoice::for_membership(&member, ctx.today, serial)?;
        log::info!("issued invoice {} for membership {}", invoice.number, member.id);

        println!();
        invoice.print_formatted();
        println!();
        Ok(())
    }
}
