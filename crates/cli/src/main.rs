//! Dairy Ledger CLI - Admin, seller and customer screens on the command line.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (role comes from the backend)
//! dairy login -c 9876543210 -p secret1
//!
//! # Admin: manage customers, sellers, areas and milk assignment
//! dairy customers list --search nagar --sort name --page 2
//! dairy sellers add --name Mahesh --contact 9000000002 --vehicle MH12AB1234 --password sellerpw
//! dairy assign add --seller 4 --date 2024-06-01 --quantity 120
//!
//! # Seller: pick today's areas and record deliveries
//! dairy addresses select 3
//! dairy deliveries record --customer 12 --quantity 2.5
//!
//! # Customer: own deliveries, payments and monthly bill
//! dairy bill --month 2024-05
//! ```
//!
//! # Environment Variables
//!
//! See `dairy_ledger_client::config`. `RUST_LOG` controls log output, which
//! goes to stderr (default `warn`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{
    AddressAction, AssignAction, CommandError, Context, CustomerAction, DeliveryAction,
    PaymentAction, SellerAction,
};

#[derive(Parser)]
#[command(name = "dairy")]
#[command(author, version, about = "Dairy Ledger: milk distribution accounts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        /// 10-digit mobile number
        #[arg(short, long)]
        contact: String,

        /// Password (or set `DAIRY_PASSWORD`)
        #[arg(short, long, env = "DAIRY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Change your password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Manage customers (admin); list customers in selected areas (seller)
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage sellers (admin)
    Sellers {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Manage delivery areas (admin) or pick today's areas (seller)
    Addresses {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Assign milk to sellers (admin)
    Assign {
        #[command(subcommand)]
        action: AssignAction,
    },
    /// Delivery records
    Deliveries {
        #[command(subcommand)]
        action: DeliveryAction,
    },
    /// Payment records
    Payments {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Monthly bill for a customer
    Bill {
        /// Month as `YYYY-MM` (default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Customer id (admin only; customers see their own bill)
        #[arg(long)]
        customer: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        render::failure(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let ctx = Context::from_env()?;
    match cli.command {
        Commands::Login { contact, password } => {
            commands::auth::login(&ctx, contact, password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Password {
            current,
            new,
            confirm,
        } => commands::auth::change_password(&ctx, current, new, confirm).await,
        Commands::Customers { action } => commands::customers::run(&ctx, action).await,
        Commands::Sellers { action } => commands::sellers::run(&ctx, action).await,
        Commands::Addresses { action } => commands::addresses::run(&ctx, action).await,
        Commands::Assign { action } => commands::assign::run(&ctx, action).await,
        Commands::Deliveries { action } => commands::deliveries::run(&ctx, action).await,
        Commands::Payments { action } => commands::payments::run(&ctx, action).await,
        Commands::Bill { month, customer } => {
            commands::bill::show(&ctx, month, customer).await
        }
    }
}
