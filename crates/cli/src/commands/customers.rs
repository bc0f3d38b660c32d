//! Customer screens.

use clap::{Args, Subcommand};
use dairy_ledger_client::{ListController, SelectedAddresses, SnapshotCache, SnapshotScreen, submit};
use dairy_ledger_core::forms::CustomerForm;
use dairy_ledger_core::validation;
use dairy_ledger_core::{AddressId, Customer, CustomerId, Role};

use super::{CommandError, Context, ListArgs, today};
use crate::render;

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List every customer (admin)
    List(ListArgs),
    /// Add a customer (admin)
    Add(CustomerFields),
    /// Edit a customer; omitted fields keep their current value (admin)
    Edit {
        /// Customer id
        id: String,
        #[command(flatten)]
        fields: CustomerEdits,
    },
    /// Delete a customer (admin)
    Delete {
        /// Customer id
        id: String,
    },
    /// Customers in the seller's selected areas, or in `--address` areas (admin)
    Area {
        /// Area ids (admin); sellers use their saved selection
        #[arg(long, value_delimiter = ',')]
        address: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args)]
pub struct CustomerFields {
    #[arg(long)]
    name: String,
    /// 10-digit mobile number
    #[arg(long)]
    contact: String,
    /// Area id
    #[arg(long)]
    address: String,
    /// Price per litre
    #[arg(long)]
    price: String,
    /// Daily litres
    #[arg(long)]
    quantity: String,
    /// Join date `YYYY-MM-DD` (default: today)
    #[arg(long)]
    join_date: Option<String>,
    /// Login password
    #[arg(long, env = "DAIRY_CUSTOMER_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args)]
pub struct CustomerEdits {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    join_date: Option<String>,
    /// New login password (default: unchanged)
    #[arg(long)]
    password: Option<String>,
}

pub async fn run(ctx: &Context, action: CustomerAction) -> Result<(), CommandError> {
    match action {
        CustomerAction::List(args) => list(ctx, &args).await,
        CustomerAction::Add(fields) => add(ctx, fields).await,
        CustomerAction::Edit { id, fields } => edit(ctx, &id, fields).await,
        CustomerAction::Delete { id } => delete(ctx, &id).await,
        CustomerAction::Area { address, list } => by_area(ctx, &address, &list).await,
    }
}

async fn list(ctx: &Context, args: &ListArgs) -> Result<(), CommandError> {
    let (session, api) = ctx.signed_in_as(Role::Admin)?;
    let fetched = SnapshotCache::new(&ctx.store)
        .fetch_or_cached(
            SnapshotScreen::Customers,
            session.user_id,
            today(),
            api.list_customers(),
        )
        .await?;

    let mut customers = ctx.list();
    customers.load(fetched);
    show(&mut customers, args);
    Ok(())
}

async fn by_area(ctx: &Context, address: &[String], args: &ListArgs) -> Result<(), CommandError> {
    let (session, api) = ctx.signed_in()?;
    let areas: Vec<AddressId> = match session.role {
        Role::Seller => SelectedAddresses::load(&ctx.store, session.user_id)?
            .ids()
            .to_vec(),
        Role::Admin => address
            .iter()
            .map(|a| validation::id("address", "Address", a))
            .collect::<Result<_, _>>()?,
        Role::Customer => {
            session.require(Role::Seller)?;
            Vec::new()
        }
    };
    if areas.is_empty() {
        render::line("No areas selected. Use `dairy addresses select <id>` first.");
        return Ok(());
    }

    let mut customers = ctx.list();
    customers.refresh(api.customers_by_area(&areas)).await?;
    show(&mut customers, args);
    Ok(())
}

fn show(customers: &mut ListController<Customer>, args: &ListArgs) {
    render::freshness(customers.freshness());
    args.apply(customers);
    let totals = customers.totals();
    let view = customers.view();
    render::page(
        &view,
        &["ID", "Name", "Contact", "Area", "Rate", "Litres", "Joined"],
        |c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.contact.clone(),
                c.address.clone().unwrap_or_default(),
                c.rate().map(|r| r.to_string()).unwrap_or_default(),
                c.milk_quantity.to_string(),
                c.join_date.clone(),
            ]
        },
    );
    if !view.is_empty() {
        render::totals(&totals, true, false);
    }
}

async fn add(ctx: &Context, fields: CustomerFields) -> Result<(), CommandError> {
    let (_, api) = ctx.signed_in_as(Role::Admin)?;
    let mut form = CustomerForm {
        id: None,
        name: fields.name,
        contact: fields.contact,
        address_id: fields.address,
        price: fields.price,
        join_date: fields.join_date.unwrap_or_else(|| today().to_string()),
        milk_quantity: fields.quantity,
        password: fields.password,
    };
    let api = &api;
    let message = submit(&mut form, move |input| async move {
        api.add_customer(&input).await
    })
    .await?;
    render::done(message, "Customer added");
    Ok(())
}

async fn edit(ctx: &Context, id: &str, edits: CustomerEdits) -> Result<(), CommandError> {
    let (_, api) = ctx.signed_in_as(Role::Admin)?;
    let id: CustomerId = validation::id("id", "Customer", id)?;
    let current = api.get_customer(id).await?;
    let join_date = edits.join_date.unwrap_or_else(|| {
        current
            .joined_on()
            .map_or_else(|| current.join_date.clone(), |d| d.to_string())
    });

    let mut form = CustomerForm {
        id: Some(id),
        name: edits.name.unwrap_or(current.name),
        contact: edits.contact.unwrap_or(current.contact),
        address_id: edits
            .address
            .or_else(|| current.address_id.map(|a| a.to_string()))
            .unwrap_or_default(),
        price: edits.price.unwrap_or_else(|| current.price.raw().to_string()),
        join_date,
        milk_quantity: edits
            .quantity
            .unwrap_or_else(|| current.milk_quantity.raw().to_string()),
        password: edits.password.unwrap_or_default(),
    };
    let api = &api;
    let message = submit(&mut form, move |input| async move {
        api.edit_customer(&input).await
    })
    .await?;
    render::done(message, "Customer updated");
    Ok(())
}

async fn delete(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let (_, api) = ctx.signed_in_as(Role::Admin)?;
    let id: CustomerId = validation::id("id", "Customer", id)?;
    let message = api.delete_customer(id).await?;
    render::done(message, "Customer deleted");
    Ok(())
}
