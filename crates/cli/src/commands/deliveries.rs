//! Delivery records.
//!
//! Sellers record and list their own rounds; customers see what they were
//! delivered; the admin can look at any seller's day.

use clap::Subcommand;
use dairy_ledger_client::{SnapshotCache, SnapshotScreen, submit};
use dairy_ledger_core::forms::DeliveryForm;
use dairy_ledger_core::{Delivery, DeliveryId, Role, SellerId, validation};

use super::{CommandError, Context, ListArgs, today};
use crate::render;

#[derive(Subcommand)]
pub enum DeliveryAction {
    /// Deliveries for a day (seller, admin) or your history (customer)
    List {
        /// Date `YYYY-MM-DD` (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Seller id (admin only)
        #[arg(long)]
        seller: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Record a delivery (seller)
    Record {
        /// Customer id
        #[arg(long)]
        customer: String,
        /// Litres delivered
        #[arg(long)]
        quantity: String,
        /// Date `YYYY-MM-DD` (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a delivery record (seller, admin)
    Delete {
        /// Delivery id
        id: String,
    },
}

pub async fn run(ctx: &Context, action: DeliveryAction) -> Result<(), CommandError> {
    match action {
        DeliveryAction::List { date, seller, list } => {
            let date = match date {
                Some(d) => validation::iso_date("date", "Date", &d)?,
                None => today(),
            };
            let (session, api) = ctx.signed_in()?;
            let mut deliveries = ctx.list();
            match session.role {
                Role::Seller => {
                    let fetched = SnapshotCache::new(&ctx.store)
                        .fetch_or_cached(
                            SnapshotScreen::Deliveries,
                            session.user_id,
                            date,
                            api.list_deliveries(session.seller_id(), date),
                        )
                        .await?;
                    deliveries.load(fetched);
                }
                Role::Admin => {
                    let seller = seller.ok_or_else(|| {
                        validation::ValidationError::new("seller", "Seller is required")
                    })?;
                    let seller: SellerId = validation::id("seller", "Seller", &seller)?;
                    deliveries.refresh(api.list_deliveries(seller, date)).await?;
                }
                Role::Customer => {
                    deliveries
                        .refresh(api.customer_deliveries(session.customer_id()))
                        .await?;
                }
            }

            render::freshness(deliveries.freshness());
            list.apply(&mut deliveries);
            let default_rate = ctx.config.default_rate;
            let totals = deliveries.totals();
            let view = deliveries.view();
            render::page(
                &view,
                &["ID", "Date", "Customer", "Seller", "Litres", "Price"],
                |d: &Delivery| {
                    vec![
                        d.id.to_string(),
                        d.date.clone(),
                        d.customer_name.clone(),
                        d.seller_name.clone(),
                        d.quantity.to_string(),
                        d.price(default_rate).display(),
                    ]
                },
            );
            if !view.is_empty() {
                render::totals(&totals, true, true);
            }
            Ok(())
        }
        DeliveryAction::Record {
            customer,
            quantity,
            date,
        } => {
            let (session, api) = ctx.signed_in_as(Role::Seller)?;
            let api = &api;
            let seller_id = session.seller_id();
            let mut form = DeliveryForm {
                customer_id: customer,
                date: date.unwrap_or_else(|| today().to_string()),
                quantity,
            };
            let message = submit(&mut form, move |input| async move {
                api.record_delivery(seller_id, &input).await
            })
            .await?;
            render::done(message, "Delivery recorded");
            Ok(())
        }
        DeliveryAction::Delete { id } => {
            let (session, api) = ctx.signed_in()?;
            if session.role == Role::Customer {
                session.require(Role::Seller)?;
            }
            let id: DeliveryId = validation::id("id", "Delivery", &id)?;
            let message = api.delete_delivery(id).await?;
            render::done(message, "Delivery deleted");
            Ok(())
        }
    }
}
