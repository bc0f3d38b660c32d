//! Payments: the admin records them, customers see their own.

use clap::Subcommand;
use dairy_ledger_client::submit;
use dairy_ledger_core::forms::PaymentForm;
use dairy_ledger_core::{CustomerId, Role, validation};

use super::{CommandError, Context, ListArgs, current_month};
use crate::render;

#[derive(Subcommand)]
pub enum PaymentAction {
    /// All payments (admin) or your own (customer)
    List(ListArgs),
    /// Record a payment (admin)
    Record {
        /// Customer id
        #[arg(long)]
        customer: String,
        /// Amount in rupees
        #[arg(long)]
        amount: String,
        /// Cash, UPI, Card, Bank Transfer or Other
        #[arg(long, default_value = "Cash")]
        method: String,
        /// Record as pending instead of paid
        #[arg(long)]
        pending: bool,
    },
    /// Mark a customer's monthly bill as paid (admin)
    MarkPaid {
        /// Customer id
        #[arg(long)]
        customer: String,
        /// Month `YYYY-MM` (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}

pub async fn run(ctx: &Context, action: PaymentAction) -> Result<(), CommandError> {
    match action {
        PaymentAction::List(args) => {
            let (session, api) = ctx.signed_in()?;
            let mut payments = ctx.list();
            match session.role {
                Role::Admin => payments.refresh(api.list_payments()).await?,
                Role::Customer => {
                    payments
                        .refresh(api.customer_payments(session.customer_id()))
                        .await?;
                }
                Role::Seller => session.require(Role::Admin)?,
            }
            args.apply(&mut payments);
            let totals = payments.totals();
            let view = payments.view();
            render::page(
                &view,
                &["ID", "Date", "Customer", "Phone", "Amount", "Method", "Status"],
                |p| {
                    vec![
                        p.id.to_string(),
                        p.paid_on()
                            .map_or_else(|| p.created_at.clone(), |d| d.to_string()),
                        p.customer_name.clone(),
                        p.phone.clone(),
                        render::rupees(p.amount.or_zero()),
                        p.method.as_str().to_string(),
                        p.status.as_str().to_string(),
                    ]
                },
            );
            if !view.is_empty() {
                render::totals(&totals, false, true);
            }
        }
        PaymentAction::Record {
            customer,
            amount,
            method,
            pending,
        } => {
            let (_, api) = ctx.signed_in_as(Role::Admin)?;
            let api = &api;
            let mut form = PaymentForm {
                customer_id: customer,
                amount,
                method,
                paid: !pending,
            };
            let message = submit(&mut form, move |input| async move {
                api.record_payment(&input).await
            })
            .await?;
            render::done(message, "Payment recorded");
        }
        PaymentAction::MarkPaid { customer, month } => {
            let (_, api) = ctx.signed_in_as(Role::Admin)?;
            let customer: CustomerId = validation::id("customer", "Customer", &customer)?;
            let month = match month {
                Some(m) => validation::month("month", "Month", &m)?,
                None => current_month(),
            };
            let message = api.mark_paid(customer, &month).await?;
            render::done(message, &format!("Bill for {month} marked paid"));
        }
    }
    Ok(())
}
