//! Milk assignment to sellers (admin).

use clap::Subcommand;
use dairy_ledger_client::submit;
use dairy_ledger_core::forms::AssignmentForm;
use dairy_ledger_core::{Role, Totals, validation};

use super::{CommandError, Context, ListArgs, today};
use crate::render;

#[derive(Subcommand)]
pub enum AssignAction {
    /// Assign litres to a seller for a date
    Add {
        /// Seller id
        #[arg(long)]
        seller: String,
        /// Litres
        #[arg(long)]
        quantity: String,
        /// Date `YYYY-MM-DD` (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Assignments for a date
    List {
        /// Date `YYYY-MM-DD` (default: today)
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
}

pub async fn run(ctx: &Context, action: AssignAction) -> Result<(), CommandError> {
    let (_, api) = ctx.signed_in_as(Role::Admin)?;
    let api = &api;
    match action {
        AssignAction::Add {
            seller,
            quantity,
            date,
        } => {
            let mut form = AssignmentForm {
                seller_id: seller,
                date: date.unwrap_or_else(|| today().to_string()),
                quantity,
            };
            let message = submit(&mut form, move |input| async move {
                api.assign_milk(&input).await
            })
            .await?;
            render::done(message, "Milk assigned");
        }
        AssignAction::List { date, list: args } => {
            let date = match date {
                Some(d) => validation::iso_date("date", "Date", &d)?,
                None => today(),
            };
            let mut assignments = ctx.list();
            assignments.refresh(api.list_assignments(date)).await?;
            args.apply(&mut assignments);
            let view = assignments.view();
            render::page(&view, &["ID", "Seller", "Date", "Litres"], |a| {
                vec![
                    a.id.to_string(),
                    a.seller_name.clone(),
                    a.date.clone(),
                    a.quantity.to_string(),
                ]
            });
            if !view.is_empty() {
                render::totals(&Totals::of_view(&view), true, false);
            }
        }
    }
    Ok(())
}
