//! Booking CLI commands: create, inspect, and drive bookings through their
//! lifecycle.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use console::style;
use rust_decimal::Decimal;

use skillmart_core::booking::Booking;
use skillmart_observe::attrs;
use skillmart_types::booking::{
    Actor, BookingStatus, CreateBookingRequest, DisputeOutcome, MessageKind, NewDeliverable,
};
use skillmart_types::ids::{BookingId, ClientId, PackageId, SellerId};

use super::{Output, format};
use crate::state::AppState;

#[derive(Subcommand)]
pub enum BookingCommand {
    /// Book one of a seller's packages.
    Create {
        #[arg(long)]
        client: ClientId,
        #[arg(long)]
        seller: SellerId,
        #[arg(long)]
        package: PackageId,
        /// Defaults to the configured marketplace currency.
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        requirements: Option<String>,
    },

    /// Show a booking with its message and revision history.
    Show { id: BookingId },

    /// List a seller's bookings, newest first.
    List {
        #[arg(long)]
        seller: SellerId,
        /// Only bookings in this status.
        #[arg(long)]
        status: Option<BookingStatus>,
    },

    /// List in-flight bookings past their expected delivery.
    Overdue,

    /// Move a booking to a new status.
    Transition {
        id: BookingId,
        status: BookingStatus,
        /// Who is acting, e.g. `seller:s-1`, `client:c-1`, `admin:ops`.
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Cancel a booking.
    Cancel {
        id: BookingId,
        #[arg(long)]
        reason: String,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Open a dispute on a booking.
    Dispute {
        id: BookingId,
        #[arg(long)]
        reason: String,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Resolve an open dispute: `release` to the seller or `refund` the client.
    Resolve {
        id: BookingId,
        outcome: DisputeOutcome,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Request a revision of delivered work.
    Revise {
        id: BookingId,
        #[arg(long)]
        details: String,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Attach a deliverable.
    Deliver {
        id: BookingId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, default_value = "")]
        note: String,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Post a message on the booking thread.
    Message {
        id: BookingId,
        body: String,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Change the agreed price before payment.
    Price {
        id: BookingId,
        amount: Decimal,
        #[arg(long = "as")]
        actor: Actor,
    },

    /// Record a failed payment attempt on an accepted booking.
    PaymentFailed {
        id: BookingId,
        #[arg(long = "as", default_value = "system")]
        actor: Actor,
    },
}

impl BookingCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BookingCommand::Create { .. } => "booking.create",
            BookingCommand::Show { .. } => "booking.show",
            BookingCommand::List { .. } => "booking.list",
            BookingCommand::Overdue => "booking.overdue",
            BookingCommand::Transition { .. } => "booking.transition",
            BookingCommand::Cancel { .. } => "booking.cancel",
            BookingCommand::Dispute { .. } => "booking.dispute",
            BookingCommand::Resolve { .. } => "booking.resolve",
            BookingCommand::Revise { .. } => "booking.revise",
            BookingCommand::Deliver { .. } => "booking.deliver",
            BookingCommand::Message { .. } => "booking.message",
            BookingCommand::Price { .. } => "booking.price",
            BookingCommand::PaymentFailed { .. } => "booking.payment-failed",
        }
    }
}

pub async fn run(state: &AppState, command: BookingCommand, out: Output) -> Result<()> {
    let service = &state.booking_service;

    let booking = match command {
        BookingCommand::Create {
            client,
            seller,
            package,
            currency,
            requirements,
        } => {
            tracing::Span::current().record(attrs::SELLER_ID, seller.as_str());
            let booking = service
                .create(CreateBookingRequest {
                    client_id: client,
                    seller_id: seller,
                    package_id: package,
                    currency,
                    requirements,
                })
                .await?;
            record_booking(&booking);
            return print_booking_result(&booking, "Booking created", out);
        }
        BookingCommand::Show { id } => {
            let booking = service.get(&id).await?;
            record_booking(&booking);
            if out.emit_json(&booking)? {
                return Ok(());
            }
            print_booking_detail(&booking);
            return Ok(());
        }
        BookingCommand::List { seller, status } => {
            tracing::Span::current().record(attrs::SELLER_ID, seller.as_str());
            let bookings = service.list_for_seller(&seller, status).await?;
            if out.emit_json(&bookings)? {
                return Ok(());
            }
            print_booking_table(&bookings, "No bookings found.");
            return Ok(());
        }
        BookingCommand::Overdue => {
            let bookings = service.overdue().await?;
            if out.emit_json(&bookings)? {
                return Ok(());
            }
            print_booking_table(&bookings, "No overdue bookings.");
            return Ok(());
        }
        BookingCommand::Transition { id, status, actor } => {
            record_actor(&actor);
            service.transition(&id, status, &actor).await?
        }
        BookingCommand::Cancel { id, reason, actor } => {
            record_actor(&actor);
            service.cancel(&id, &reason, &actor).await?
        }
        BookingCommand::Dispute { id, reason, actor } => {
            record_actor(&actor);
            service.dispute(&id, &reason, &actor).await?
        }
        BookingCommand::Resolve { id, outcome, actor } => {
            record_actor(&actor);
            service.resolve_dispute(&id, outcome, &actor).await?
        }
        BookingCommand::Revise { id, details, actor } => {
            record_actor(&actor);
            service.request_revision(&id, &details, &actor).await?
        }
        BookingCommand::Deliver {
            id,
            title,
            url,
            note,
            actor,
        } => {
            record_actor(&actor);
            let deliverable = NewDeliverable { title, url, note };
            service.add_deliverable(&id, deliverable, &actor).await?
        }
        BookingCommand::Message { id, body, actor } => {
            record_actor(&actor);
            service.add_message(&id, &body, &actor).await?
        }
        BookingCommand::Price { id, amount, actor } => {
            record_actor(&actor);
            service.renegotiate_price(&id, amount, &actor).await?
        }
        BookingCommand::PaymentFailed { id, actor } => {
            record_actor(&actor);
            service.record_payment_failure(&id, &actor).await?
        }
    };

    record_booking(&booking);
    print_booking_result(&booking, "Booking updated", out)
}

fn record_actor(actor: &Actor) {
    tracing::Span::current().record(attrs::ACTOR, actor.to_string().as_str());
}

fn record_booking(booking: &Booking) {
    let span = tracing::Span::current();
    span.record(attrs::BOOKING_ID, booking.id().as_str());
    span.record(attrs::BOOKING_STATUS, booking.status().as_str());
    span.record(attrs::SELLER_ID, booking.seller_id().as_str());
}

fn print_booking_result(booking: &Booking, headline: &str, out: Output) -> Result<()> {
    if out.emit_json(booking)? {
        return Ok(());
    }

    println!();
    println!(
        "  {} {} {}",
        style("✓").green().bold(),
        headline,
        style(booking.id()).cyan().bold()
    );
    println!(
        "  {}  {}   {}  {}   {}  v{}",
        style("Status:").bold(),
        format::booking_status(booking.status()),
        style("Payment:").bold(),
        format::payment_status(booking.payment_status()),
        style("Version:").bold(),
        booking.version()
    );
    println!();
    Ok(())
}

fn print_booking_detail(booking: &Booking) {
    let now = chrono::Utc::now();

    println!();
    println!("  {}", style(booking.id()).cyan().bold());
    println!(
        "  {} → {}  {}",
        booking.client_id(),
        booking.seller_id(),
        style(format!("({})", booking.service_id())).dim()
    );
    println!();
    println!("  {}", style("── Status ──").dim());
    println!("  {}     {}", style("Booking:").bold(), format::booking_status(booking.status()));
    println!("  {}     {}", style("Payment:").bold(), format::payment_status(booking.payment_status()));
    println!("  {}     v{}", style("Version:").bold(), booking.version());

    println!();
    println!("  {}", style("── Money ──").dim());
    println!(
        "  {}        {} {}",
        style("Price:").bold(),
        booking.agreed_price(),
        booking.currency()
    );
    println!("  {} {}", style("Platform fee:").bold(), booking.platform_fee());
    println!("  {}      {}", style("Earning:").bold(), booking.seller_earning());

    println!();
    println!("  {}", style("── Schedule ──").dim());
    println!("  {}      {}", style("Created:").bold(), format::datetime(&booking.created_at()));
    if let Some(start) = booking.start_date() {
        println!("  {}      {}", style("Started:").bold(), format::datetime(&start));
    }
    if let Some(due) = booking.expected_delivery() {
        let due_text = format!("{} ({})", format::datetime(&due), format::relative(&due, now));
        if booking.is_overdue(now) {
            println!("  {}          {}", style("Due:").bold(), style(due_text).red());
        } else {
            println!("  {}          {}", style("Due:").bold(), due_text);
        }
    }
    if let Some(delivered) = booking.actual_delivery() {
        println!("  {}    {}", style("Delivered:").bold(), format::datetime(&delivered));
    }
    println!(
        "  {}    {}/{} used",
        style("Revisions:").bold(),
        booking.revisions_used(),
        booking.max_revisions()
    );

    if let Some(cancellation) = booking.cancellation() {
        println!();
        println!("  {}", style("── Cancellation ──").dim());
        println!("  {} {}", style(&cancellation.cancelled_by).bold(), cancellation.reason);
    }
    if let Some(dispute) = booking.dispute_info() {
        println!();
        println!("  {}", style("── Dispute ──").dim());
        println!("  {} {}", style(&dispute.raised_by).bold(), dispute.reason);
        if let Some(outcome) = dispute.outcome {
            let outcome = match outcome {
                DisputeOutcome::Release => "released to seller",
                DisputeOutcome::Refund => "refunded to client",
            };
            println!("  {} {outcome}", style("Outcome:").bold());
        }
    }

    if !booking.deliverables().is_empty() {
        println!();
        println!("  {}", style("── Deliverables ──").dim());
        for deliverable in booking.deliverables().iter() {
            match &deliverable.url {
                Some(url) => println!(
                    "  {} {} {}",
                    style("•").dim(),
                    deliverable.title,
                    style(url).underlined()
                ),
                None => println!("  {} {}", style("•").dim(), deliverable.title),
            }
        }
    }

    if !booking.messages().is_empty() {
        println!();
        println!("  {}", style("── Messages ──").dim());
        for message in booking.messages().iter() {
            let time = style(message.created_at.format("%m-%d %H:%M")).dim();
            match message.kind {
                MessageKind::System => {
                    println!("  {time} {}", style(&message.body).italic().dim());
                }
                _ => println!("  {time} {} {}", style(&message.author).bold(), message.body),
            }
        }
    }
    println!();
}

fn print_booking_table(bookings: &[Booking], empty: &str) {
    if bookings.is_empty() {
        println!();
        println!("  {}", style(empty).dim());
        println!();
        return;
    }

    let now = chrono::Utc::now();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Client", "Package", "Status", "Price", "Due"]);

    for booking in bookings {
        let due = booking
            .expected_delivery()
            .map(|due| format::relative(&due, now))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(booking.id()),
            Cell::new(booking.client_id()),
            Cell::new(booking.service_id()),
            format::booking_status_cell(booking.status()),
            Cell::new(format!("{} {}", booking.agreed_price(), booking.currency())),
            Cell::new(due),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {} booking{}",
        bookings.len(),
        if bookings.len() == 1 { "" } else { "s" }
    );
    println!();
}
