//! Monthly bill.

use dairy_ledger_core::{CustomerId, Role, validation};

use super::{CommandError, Context, current_month};
use crate::render;

/// Show a customer's bill for `month`.
pub async fn show(
    ctx: &Context,
    month: Option<String>,
    customer: Option<String>,
) -> Result<(), CommandError> {
    let (session, api) = ctx.signed_in()?;
    let customer_id: CustomerId = match (session.role, customer) {
        (Role::Customer, _) => session.customer_id(),
        (Role::Admin, Some(id)) => validation::id("customer", "Customer", &id)?,
        (Role::Admin, None) => {
            return Err(validation::ValidationError::new("customer", "Customer is required").into());
        }
        (Role::Seller, _) => {
            session.require(Role::Customer)?;
            return Ok(());
        }
    };
    let month = match month {
        Some(m) => validation::month("month", "Month", &m)?,
        None => current_month(),
    };
    let bill = api.customer_summary(customer_id, &month).await?;

    render::table(
        &["Month", "Litres", "Amount", "Paid", "Due", "Status"],
        &[vec![
            bill.month.clone(),
            render::litres(bill.total_quantity.or_zero()),
            render::rupees(bill.total_amount.or_zero()),
            render::rupees(bill.paid_amount.or_zero()),
            render::rupees(bill.due()),
            bill.status.as_str().to_string(),
        ]],
    );
    Ok(())
}
