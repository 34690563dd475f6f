use anyhow::Result;
use chrono::NaiveDate;

use gymdesk_data::{Membership, MembershipStore};
use gymdesk_status::status::{Classification, Classify, StatusPolicy};

use crate::cli::Command;

mod members;
pub use members::*;

mod stats;
pub use stats::*;

mod invoice;
pub use invoice::*;

mod plans;
pub use plans::*;

/// State shared by the commands of a single run.
///
/// `today` is fixed once when the run starts so every
/// status shown by a command refers to the same day.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub today: NaiveDate,
    pub policy: StatusPolicy,
}

/// A fetched listing, split by whether each expiry date could be read.
pub struct Snapshot<'a> {
    pub classified: Vec<(&'a Membership, Classification)>,
    pub malformed: Vec<(&'a Membership, gymdesk_status::Error)>,
}

impl<'a> Snapshot<'a> {
    /// Classify every membership once. Records with unreadable dates
    /// are logged and set aside instead of failing the command.
    pub fn classify(members: &'a [Membership], ctx: &Context) -> Self {
        let mut snapshot = Snapshot {
            classified: Vec::with_capacity(members.len()),
            malformed: Vec::new(),
        };
        for member in members {
            match member.classify(ctx.today, &ctx.policy) {
                Ok(classification) => snapshot.classified.push((member, classification)),
                Err(err) => {
                    log::warn!("membership {} skipped: {}", member.id, err);
                    snapshot.malformed.push((member, err));
                }
            }
        }
        snapshot
    }
}

impl Command {
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        match self {
            Command::Members(cmd) => cmd.run(db, ctx).await,
            Command::Stats(cmd) => cmd.run(db, ctx).await,
            Command::Invoice(cmd) => cmd.run(db, ctx).await,
            Command::Plans(cmd) => cmd.run(ctx),
        }
    }
}
