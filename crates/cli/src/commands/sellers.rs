//! Seller management (admin).

use clap::{Args, Subcommand};
use dairy_ledger_client::submit;
use dairy_ledger_core::forms::SellerForm;
use dairy_ledger_core::validation;
use dairy_ledger_core::{Role, SellerId};

use super::{CommandError, Context, ListArgs};
use crate::render;

#[derive(Subcommand)]
pub enum SellerAction {
    /// List sellers
    List(ListArgs),
    /// Add a seller
    Add(SellerFields),
    /// Edit a seller; omitted fields keep their current value
    Edit {
        /// Seller id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        vehicle: Option<String>,
        /// New login password (default: unchanged)
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a seller
    Delete {
        /// Seller id
        id: String,
    },
}

#[derive(Args)]
pub struct SellerFields {
    #[arg(long)]
    name: String,
    /// 10-digit mobile number
    #[arg(long)]
    contact: String,
    /// Vehicle registration number
    #[arg(long)]
    vehicle: String,
    /// Login password
    #[arg(long, env = "DAIRY_SELLER_PASSWORD", hide_env_values = true)]
    password: String,
}

pub async fn run(ctx: &Context, action: SellerAction) -> Result<(), CommandError> {
    let (_, api) = ctx.signed_in_as(Role::Admin)?;
    let api = &api;
    match action {
        SellerAction::List(args) => {
            let mut sellers = ctx.list();
            sellers.refresh(api.list_sellers()).await?;
            args.apply(&mut sellers);
            let view = sellers.view();
            render::page(&view, &["ID", "Name", "Contact", "Vehicle"], |s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.contact.clone(),
                    s.vehicle_no.clone(),
                ]
            });
        }
        SellerAction::Add(fields) => {
            let mut form = SellerForm {
                id: None,
                name: fields.name,
                contact: fields.contact,
                vehicle_no: fields.vehicle,
                password: fields.password,
            };
            let message = submit(&mut form, move |input| async move {
                api.add_seller(&input).await
            })
            .await?;
            render::done(message, "Seller added");
        }
        SellerAction::Edit {
            id,
            name,
            contact,
            vehicle,
            password,
        } => {
            let id: SellerId = validation::id("id", "Seller", &id)?;
            let current = api
                .list_sellers()
                .await?
                .into_iter()
                .find(|s| s.id == id)
                .ok_or_else(|| validation::ValidationError::new("id", "Seller not found"))?;
            let mut form = SellerForm {
                id: Some(id),
                name: name.unwrap_or(current.name),
                contact: contact.unwrap_or(current.contact),
                vehicle_no: vehicle.unwrap_or(current.vehicle_no),
                password: password.unwrap_or_default(),
            };
            let message = submit(&mut form, move |input| async move {
                api.edit_seller(&input).await
            })
            .await?;
            render::done(message, "Seller updated");
        }
        SellerAction::Delete { id } => {
            let id: SellerId = validation::id("id", "Seller", &id)?;
            let message = api.delete_seller(id).await?;
            render::done(message, "Seller deleted");
        }
    }
    Ok(())
}
