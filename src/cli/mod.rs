//! Command-line front end.
//!
//! Provides subcommands for working against a hotel booking backend:
//! - `login` / `register` / `logout` / `whoami` - manage the stored session
//! - `hotels list|create|update|delete` - browse and (as admin) manage hotels
//! - `bookings list|create|update|delete` - manage your own reservations

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::auth::{AuthState, Operation, Role};
use crate::booking::{format_date, parse_date, StayForm};
use crate::gateway::{Gateway, HotelCatalog};
use crate::models::{HotelDraft, RegisterRequest};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "staybook")]
#[command(author, version, about = "Browse hotels and manage your bookings", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "staybook.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Backend URL (overrides [api] base_url)
    #[arg(long, env = "STAYBOOK_API_URL")]
    pub api_url: Option<String>,

    /// Session file (overrides [session] path)
    #[arg(long, env = "STAYBOOK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session for 7 days
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STAYBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a user account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        tel: String,
        #[arg(long, env = "STAYBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// Hotel commands
    #[command(subcommand)]
    Hotels(HotelsCommands),

    /// Booking commands
    #[command(subcommand)]
    Bookings(BookingsCommands),
}

#[derive(Subcommand, Debug)]
pub enum HotelsCommands {
    /// List all hotels
    List,
    /// Add a hotel (admin)
    Create(HotelFields),
    /// Change some fields of a hotel (admin)
    Update {
        id: String,
        #[command(flatten)]
        fields: HotelPatch,
    },
    /// Remove a hotel (admin)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommands {
    /// List your bookings
    List,
    /// Book a stay
    Create {
        hotel_id: String,
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        checkin: String,
        /// Check-out date (YYYY-MM-DD), defaults to the day after check-in
        #[arg(long)]
        checkout: Option<String>,
    },
    /// Change the dates of one of your bookings
    Update {
        booking_id: String,
        #[arg(long)]
        checkin: Option<String>,
        #[arg(long)]
        checkout: Option<String>,
    },
    /// Cancel one of your bookings
    Delete { booking_id: String },
}

#[derive(Args, Debug)]
pub struct HotelFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub province: String,
    #[arg(long)]
    pub postalcode: String,
    #[arg(long)]
    pub tel: String,
    #[arg(long, default_value = "")]
    pub picture: String,
}

impl From<&HotelFields> for HotelDraft {
    fn from(fields: &HotelFields) -> Self {
        Self {
            name: fields.name.clone(),
            address: fields.address.clone(),
            district: fields.district.clone(),
            province: fields.province.clone(),
            postalcode: fields.postalcode.clone(),
            tel: fields.tel.clone(),
            picture: fields.picture.clone(),
        }
        .normalized()
    }
}

#[derive(Args, Debug, Default)]
pub struct HotelPatch {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub postalcode: Option<String>,
    #[arg(long)]
    pub tel: Option<String>,
    #[arg(long)]
    pub picture: Option<String>,
}

impl HotelPatch {
    /// Overlay the provided fields onto `draft`.
    pub fn apply(&self, mut draft: HotelDraft) -> HotelDraft {
        let fields = [
            (&self.name, &mut draft.name),
            (&self.address, &mut draft.address),
            (&self.district, &mut draft.district),
            (&self.province, &mut draft.province),
            (&self.postalcode, &mut draft.postalcode),
            (&self.tel, &mut draft.tel),
            (&self.picture, &mut draft.picture),
        ];
        for (patch, field) in fields {
            if let Some(value) = patch {
                *field = value.clone();
            }
        }
        draft
    }
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

/// Run a CLI command
pub async fn run_command(cli: &Cli, gateway: &Gateway) -> Result<()> {
    match &cli.command {
        Commands::Login { email, password } => cmd_login(gateway, email, password).await,
        Commands::Register {
            name,
            email,
            tel,
            password,
        } => cmd_register(gateway, name, email, tel, password).await,
        Commands::Logout => cmd_logout(gateway),
        Commands::Whoami => cmd_whoami(gateway).await,
        Commands::Hotels(HotelsCommands::List) => cmd_hotels_list(gateway).await,
        Commands::Hotels(HotelsCommands::Create(fields)) => {
            cmd_hotels_create(gateway, fields).await
        }
        Commands::Hotels(HotelsCommands::Update { id, fields }) => {
            cmd_hotels_update(gateway, id, fields).await
        }
        Commands::Hotels(HotelsCommands::Delete { id }) => cmd_hotels_delete(gateway, id).await,
        Commands::Bookings(BookingsCommands::List) => cmd_bookings_list(gateway).await,
        Commands::Bookings(BookingsCommands::Create {
            hotel_id,
            checkin,
            checkout,
        }) => cmd_bookings_create(gateway, hotel_id, checkin, checkout.as_deref()).await,
        Commands::Bookings(BookingsCommands::Update {
            booking_id,
            checkin,
            checkout,
        }) => {
            cmd_bookings_update(gateway, booking_id, checkin.as_deref(), checkout.as_deref()).await
        }
        Commands::Bookings(BookingsCommands::Delete { booking_id }) => {
            cmd_bookings_delete(gateway, booking_id).await
        }
    }
}

async fn cmd_login(gateway: &Gateway, email: &str, password: &str) -> Result<()> {
    let session = gateway.login(email, password).await.context("Login failed")?;
    let who = if session.name.is_empty() {
        &session.email
    } else {
        &session.name
    };
    println!("[OK] Signed in as {}", who);
    Ok(())
}

async fn cmd_register(
    gateway: &Gateway,
    name: &str,
    email: &str,
    tel: &str,
    password: &str,
) -> Result<()> {
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        tel: tel.to_string(),
        password: password.to_string(),
        role: Role::User,
    };
    gateway
        .register(&request)
        .await
        .context("Registration failed")?;
    println!("[OK] Account created. Use 'staybook login' to sign in.");
    Ok(())
}

fn cmd_logout(gateway: &Gateway) -> Result<()> {
    gateway.logout()?;
    println!("Signed out.");
    Ok(())
}

async fn cmd_whoami(gateway: &Gateway) -> Result<()> {
    let ctx = gateway.resolve_context().await;
    match (ctx.state(), ctx.session()) {
        (AuthState::Authenticated, Some(session)) => {
            let profile = ctx.profile();
            println!();
            println!(
                "Name:  {}",
                profile.map(|p| p.name.as_str()).unwrap_or(session.name.as_str())
            );
            println!(
                "Email: {}",
                profile.map(|p| p.email.as_str()).unwrap_or(session.email.as_str())
            );
            println!("Role:  {}", ctx.role());
            if ctx.role().can_manage_hotels() {
                println!("       (can add, edit and remove hotels)");
            }
            println!("API:   {}", gateway.api().base_url());
            if profile.is_none() {
                println!();
                println!("[!!] Profile lookup failed; the session may have expired on the server.");
            }
            println!();
        }
        _ => println!("Not signed in."),
    }
    Ok(())
}

async fn cmd_hotels_list(gateway: &Gateway) -> Result<()> {
    let mut catalog = HotelCatalog::new();
    let hotels = catalog.refresh(gateway).await?;

    if hotels.is_empty() {
        println!("No hotels found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<26}  {:<24}  {:<30}  {:<16}  {:<14}",
        "ID", "NAME", "ADDRESS", "PROVINCE", "TEL"
    );
    println!("{}", "-".repeat(118));

    for hotel in hotels {
        println!(
            "{:<26}  {:<24}  {:<30}  {:<16}  {:<14}",
            hotel.id,
            truncate(&hotel.name, 24),
            truncate(&hotel.address, 30),
            truncate(&hotel.province, 16),
            hotel.tel
        );
    }

    println!();
    Ok(())
}

async fn cmd_hotels_create(gateway: &Gateway, fields: &HotelFields) -> Result<()> {
    let ctx = gateway.resolve_context().await;
    gateway.authorize(&ctx, Operation::CreateHotel)?;

    let draft = HotelDraft::from(fields);
    let mut catalog = HotelCatalog::new();
    catalog.create(gateway, &ctx, &draft).await?;

    println!("[OK] Hotel created: {}", draft.name);
    print_catalog_size(&catalog);
    Ok(())
}

async fn cmd_hotels_update(gateway: &Gateway, id: &str, patch: &HotelPatch) -> Result<()> {
    let ctx = gateway.resolve_context().await;
    gateway.authorize(&ctx, Operation::UpdateHotel)?;

    let mut catalog = HotelCatalog::new();
    catalog.refresh(gateway).await?;
    let current = catalog
        .get(id)
        .map(|hotel| hotel.draft())
        .ok_or_else(|| anyhow::anyhow!("Hotel not found: {}", id))?;

    let draft = patch.apply(current);
    catalog.update(gateway, &ctx, id, &draft).await?;

    println!("[OK] Hotel updated: {}", draft.name);
    print_catalog_size(&catalog);
    Ok(())
}

async fn cmd_hotels_delete(gateway: &Gateway, id: &str) -> Result<()> {
    let ctx = gateway.resolve_context().await;
    gateway.authorize(&ctx, Operation::DeleteHotel)?;

    let mut catalog = HotelCatalog::new();
    catalog.delete(gateway, &ctx, id).await?;

    println!("[OK] Hotel deleted: {}", id);
    print_catalog_size(&catalog);
    Ok(())
}

fn print_catalog_size(catalog: &HotelCatalog) {
    if catalog.is_stale() {
        println!(
            "[!!] Could not refresh the hotel list; run 'staybook hotels list' to see the change."
        );
    } else {
        println!("{} hotel(s) listed.", catalog.hotels().len());
    }
}

async fn cmd_bookings_list(gateway: &Gateway) -> Result<()> {
    let ctx = gateway.context();
    let bookings = gateway.bookings().list_mine(&ctx).await?;

    if bookings.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<26}  {:<24}  {:<12}  {:<12}  {:<12}",
        "ID", "HOTEL", "CHECK-IN", "CHECK-OUT", "CREATED"
    );
    println!("{}", "-".repeat(94));

    for booking in &bookings {
        println!(
            "{:<26}  {:<24}  {:<12}  {:<12}  {:<12}",
            booking.id,
            truncate(&booking.hotel.name, 24),
            display_date(&booking.booking_date),
            display_date(&booking.checkout_date),
            display_date(&booking.created_at)
        );
    }

    println!();
    Ok(())
}

async fn cmd_bookings_create(
    gateway: &Gateway,
    hotel_id: &str,
    checkin: &str,
    checkout: Option<&str>,
) -> Result<()> {
    let ctx = gateway.context();

    let mut form = StayForm::starting_on(parse_date(checkin)?)?;
    if let Some(checkout) = checkout {
        form.set_checkout_date(parse_date(checkout)?)?;
    }
    let interval = form.submit()?;

    gateway.bookings().create(&ctx, hotel_id, &interval).await?;

    println!(
        "[OK] Booked {} night(s): {} to {}",
        interval.nights(),
        format_date(interval.booking_date),
        format_date(interval.checkout_date)
    );
    Ok(())
}

async fn cmd_bookings_update(
    gateway: &Gateway,
    booking_id: &str,
    checkin: Option<&str>,
    checkout: Option<&str>,
) -> Result<()> {
    let ctx = gateway.context();
    let bookings = gateway.bookings().list_mine(&ctx).await?;
    let booking = bookings
        .iter()
        .find(|booking| booking.id == booking_id)
        .ok_or_else(|| anyhow::anyhow!("Booking not found: {}", booking_id))?;

    let mut form = StayForm::from_booking(booking)?;
    if let Some(checkin) = checkin {
        let before = form.interval();
        let after = form.set_booking_date(parse_date(checkin)?)?;
        if after.checkout_date != before.checkout_date {
            println!(
                "Check-out moved to {} to follow the new check-in.",
                format_date(after.checkout_date)
            );
        }
    }
    if let Some(checkout) = checkout {
        form.set_checkout_date(parse_date(checkout)?)?;
    }
    let interval = form.submit()?;

    gateway
        .bookings()
        .update(&ctx, &booking.id, &interval, &booking.created_at)
        .await?;

    println!(
        "[OK] Booking {} now runs {} to {}",
        booking.id,
        format_date(interval.booking_date),
        format_date(interval.checkout_date)
    );
    Ok(())
}

async fn cmd_bookings_delete(gateway: &Gateway, booking_id: &str) -> Result<()> {
    let ctx = gateway.context();
    gateway.bookings().delete(&ctx, booking_id).await?;
    println!("[OK] Booking deleted: {}", booking_id);
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Render a backend date as `YYYY-MM-DD`, or as sent if it does not parse
fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(format_date)
        .unwrap_or_else(|_| raw.to_string())
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
