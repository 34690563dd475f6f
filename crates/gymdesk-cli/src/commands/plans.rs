use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use gymdesk_status::plans;

use crate::commands::Context;

#[derive(Subcommand, Debug)]
pub enum Plans {
    /// List the available plans
    #[clap(name = "list")]
    List,
    /// Calculate the expiry date of a plan
    #[clap(name = "expiry")]
    Expiry(PlanExpiry),
}

impl Plans {
    pub fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Plans::List => {
                println!("{:>6}\t{}", "Months", "Plan");
                println!("{:-<24}", "-");
                for (months, label) in plans::PLANS {
                    println!("{:>6}\t{}", months, label);
                }
                Ok(())
            }
            Plans::Expiry(cmd) => cmd.run(ctx),
        }
    }
}

#[derive(Args, Debug)]
pub struct PlanExpiry {
    /// Joining date, defaults to today
    #[clap(short, long)]
    pub joined: Option<NaiveDate>,
    #[clap(short, long, default_value_t = 1)]
    pub months: u32,
}

impl PlanExpiry {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let joined = self.joined.unwrap_or(ctx.today);
        let expires = plans::derive_expiry(joined, self.months)?;
        println!(
            "{} from {}: expires {}",
            plans::plan_label(self.months),
            joined,
            expires
        );
        Ok(())
    }
}
