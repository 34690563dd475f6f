use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use gymdesk_data::{Membership, MembershipFilter, MembershipStore, DEFAULT_PAYMENT_METHOD};
use gymdesk_status::{
    filter::{self, MembershipQuery, PlanFilter, StatusFilter},
    plans,
    stats,
    status::Classify,
};

use crate::commands::{Context, Snapshot};
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a membership
    #[clap(name = "show")]
    Show(ShowMember),
    /// List memberships
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a membership
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a membership
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a membership
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db, ctx).await,
            Members::List(cmd) => cmd.run(db, ctx).await,
            Members::Add(cmd) => cmd.run(db, ctx).await,
            Members::Update(cmd) => cmd.run(db, ctx).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

fn confirm(message: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(Confirm::new(message).with_default(true).prompt()?)
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a membership
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let member: Membership = db.retrieve(self.id).await?;
        let classification = member.classify(ctx.today, &ctx.policy)?;
        println!();
        member.print_formatted();
        println!("Status:\t\t\t{}", classification.describe());
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Search name, email and phone
    #[clap(short, long, default_value = "")]
    pub search: String,
    /// Plan label or `All`
    #[clap(short, long, default_value = filter::ALL)]
    pub plan: PlanFilter,
    /// `All`, `Active`, `Expiring` or `Expired`
    #[clap(long, default_value = filter::ALL)]
    pub status: StatusFilter,
}

impl ListMembers {
    /// Run the command and list memberships
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let members: Vec<Membership> = db.query(&MembershipFilter::default()).await?;

        let query = MembershipQuery {
            search_term: self.search,
            plan: self.plan,
            status: self.status,
        };
        let snapshot = Snapshot::classify(&members, ctx);
        let rows = filter::select(snapshot.classified.iter().copied(), &query, &ctx.policy);

        println!("{} of {} members.", rows.len(), members.len());
        rows.print_formatted();
        if !snapshot.malformed.is_empty() {
            println!();
            snapshot.malformed.print_formatted();
        }

        // Statistics always cover the full listing
        let stats = stats::tally(snapshot.classified.iter().copied(), &ctx.policy);
        println!();
        stats.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: String,
    #[clap(long)]
    pub phone: String,
    /// Plan duration in months
    #[clap(short, long, default_value_t = 1)]
    pub months: u32,
    /// Joining date, defaults to today
    #[clap(short, long)]
    pub joined: Option<NaiveDate>,
    /// Expiry date, derived from joining date and plan if omitted
    #[clap(long)]
    pub expires: Option<NaiveDate>,
    #[clap(short, long, default_value = "General")]
    pub workout: String,
    #[clap(long, default_value = DEFAULT_PAYMENT_METHOD)]
    pub payment: String,
    #[clap(short, long)]
    pub amount: Option<f64>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    /// Build the membership this command would add.
    pub fn membership(&self, ctx: &Context) -> Result<Membership> {
        let joined = self.joined.unwrap_or(ctx.today);
        let expires = match self.expires {
            Some(expires) => expires,
            None => plans::derive_expiry(joined, self.months)?,
        };

        Ok(Membership {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            plan_type: plans::plan_label(self.months).to_string(),
            workout_type: self.workout.clone(),
            joining_date: Some(joined.to_string()),
            expiry_date: expires.to_string(),
            payment_method: Some(self.payment.clone()),
            amount: self.amount,
            ..Default::default()
        })
    }

    /// Run the command and add a membership
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let member = self.membership(ctx)?;

        println!();
        member.print_formatted();
        println!();

        if !confirm("Add membership?", self.yes)? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        println!("Membership added with id {}.", member.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(long)]
    pub phone: Option<String>,
    /// New plan duration in months
    #[clap(short, long)]
    pub months: Option<u32>,
    #[clap(short, long)]
    pub joined: Option<NaiveDate>,
    #[clap(long)]
    pub expires: Option<NaiveDate>,
    #[clap(short, long)]
    pub workout: Option<String>,
    #[clap(long)]
    pub payment: Option<String>,
    #[clap(short, long)]
    pub amount: Option<f64>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdateMember {
    /// Apply the requested changes to `member`.
    ///
    /// Changing the plan or the joining date re-derives the expiry
    /// date unless one is given. Without a new plan the duration is
    /// read back from the stored plan label.
    pub fn apply(&self, member: &Membership) -> Result<Membership> {
        let mut update = member.clone();

        if let Some(name) = &self.name {
            update.name = name.clone();
        }
        if let Some(email) = &self.email {
            update.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            update.phone = phone.clone();
        }
        if let Some(workout) = &self.workout {
            update.workout_type = workout.clone();
        }
        if let Some(payment) = &self.payment {
            update.payment_method = Some(payment.clone());
        }
        if let Some(amount) = self.amount {
            update.amount = Some(amount);
        }
        if let Some(months) = self.months {
            update.plan_type = plans::plan_label(months).to_string();
        }
        if let Some(joined) = self.joined {
            update.joining_date = Some(joined.to_string());
        }

        if let Some(expires) = self.expires {
            update.expiry_date = expires.to_string();
        } else if self.months.is_some() || self.joined.is_some() {
            let months = self
                .months
                .unwrap_or_else(|| plans::plan_duration(&member.plan_type));
            match update.joining_date() {
                Some(joined) => {
                    update.expiry_date = plans::derive_expiry_from(joined, months)?.to_string();
                }
                None => log::warn!(
                    "membership {} has no joining date, keeping expiry {}",
                    member.id,
                    member.expiry_date
                ),
            }
        }

        Ok(update)
    }

    /// Run command and update a membership
    pub async fn run<DB: MembershipStore>(self, db: &DB, ctx: &Context) -> Result<()> {
        let member: Membership = db.retrieve(self.id).await?;
        let update = self.apply(&member)?;

        println!();
        (member.clone(), update.clone()).print_formatted();
        println!(
            "Status:\t\t\t{}",
            update.classify(ctx.today, &ctx.policy)?.describe()
        );
        println!();

        if !confirm("Update membership?", self.yes)? {
            return Ok(());
        }

        db.update(update).await?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    pub async fn run<DB: MembershipStore>(&self, db: &DB) -> Result<()> {
        let member: Membership = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        if !confirm("Delete membership?", self.yes)? {
            return Ok(());
        }
        db.delete(member).await?;
        Ok(())
    }
}
