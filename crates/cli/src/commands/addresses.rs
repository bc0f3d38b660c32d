//! Delivery areas: managed by the admin, picked daily by sellers.

use clap::Subcommand;
use dairy_ledger_client::{SelectedAddresses, submit};
use dairy_ledger_core::forms::AddressForm;
use dairy_ledger_core::validation;
use dairy_ledger_core::{AddressId, Role};

use super::{CommandError, Context};
use crate::render;

#[derive(Subcommand)]
pub enum AddressAction {
    /// List areas; sellers see which ones they have selected
    List,
    /// Add an area (admin)
    Add {
        /// Area name
        label: String,
    },
    /// Delete an area (admin)
    Delete {
        /// Area id
        id: String,
    },
    /// Select or unselect an area for today's round (seller)
    Select {
        /// Area id
        id: String,
    },
}

pub async fn run(ctx: &Context, action: AddressAction) -> Result<(), CommandError> {
    match action {
        AddressAction::List => list(ctx).await,
        AddressAction::Add { label } => {
            let (_, api) = ctx.signed_in_as(Role::Admin)?;
            let api = &api;
            let mut form = AddressForm { label };
            let message = submit(&mut form, move |input| async move {
                api.add_address(&input).await
            })
            .await?;
            render::done(message, "Area added");
            Ok(())
        }
        AddressAction::Delete { id } => {
            let (_, api) = ctx.signed_in_as(Role::Admin)?;
            let id: AddressId = validation::id("id", "Area", &id)?;
            let message = api.delete_address(id).await?;
            render::done(message, "Area deleted");
            Ok(())
        }
        AddressAction::Select { id } => {
            let (session, _) = ctx.signed_in_as(Role::Seller)?;
            let id: AddressId = validation::id("id", "Area", &id)?;
            let mut selection = SelectedAddresses::load(&ctx.store, session.user_id)?;
            let selected = selection.toggle(id);
            selection.save(&ctx.store)?;
            render::line(&format!(
                "Area {id} {}",
                if selected { "selected" } else { "unselected" }
            ));
            Ok(())
        }
    }
}

async fn list(ctx: &Context) -> Result<(), CommandError> {
    let (session, api) = ctx.signed_in()?;
    let selection = match session.role {
        Role::Seller => Some(SelectedAddresses::load(&ctx.store, session.user_id)?),
        Role::Admin => None,
        Role::Customer => {
            session.require(Role::Admin)?;
            None
        }
    };
    let addresses = api.list_addresses().await?;
    if addresses.is_empty() {
        render::line("No records found");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = addresses
        .iter()
        .map(|a| {
            let mut row = vec![a.id.to_string(), a.label.clone()];
            if let Some(selection) = &selection {
                row.push(if selection.contains(a.id) { "*" } else { "" }.to_string());
            }
            row
        })
        .collect();
    let headers: &[&str] = if selection.is_some() {
        &["ID", "Area", "Selected"]
    } else {
        &["ID", "Area"]
    };
    render::table(headers, &rows);
    Ok(())
}
