//! Booking wizard demo binary
//!
//! Walks one booking through every step against the sample catalog and the
//! in-memory reservation service.

use booking::{
    BookingConfig, BookingEnvironment, BookingWizard, InMemoryReservationGateway,
    InMemorySession, PaymentMethod, SubmissionStatus, TicketType, UserProfile, sample,
};
use marquee_core::environment::SystemClock;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking=debug,marquee_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BookingConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let clock = Arc::new(SystemClock);
    let environment = BookingEnvironment::new(
        clock.clone(),
        Arc::new(InMemorySession::signed_in(UserProfile::new(
            "Demo Customer",
            "demo@marquee.test",
        ))),
        Arc::new(InMemoryReservationGateway::new(clock)),
    )
    .with_config(config);

    let wizard = BookingWizard::new(environment);

    println!("=== Marquee Booking Wizard ===\n");

    let movie = sample::movies()[0].clone();
    let theater = sample::theaters()[0].clone();
    let screening = sample::screenings(&movie, &theater)[1].clone();

    println!("Step 1: {} ({} min)", movie.title, movie.running_minutes);
    wizard.select_movie(Some(movie.clone())).await?;
    wizard.next_step().await?;

    println!("Step 2: {} ({})", theater.name, theater.location);
    wizard.select_theater(Some(theater)).await?;
    wizard.next_step().await?;

    println!(
        "Step 3: {} at {} in {}",
        screening.date(),
        screening.starts_at.format("%H:%M"),
        screening.screen_name
    );
    wizard.select_date(Some(screening.date())).await?;
    wizard.select_screening(Some(screening)).await?;
    wizard.next_step().await?;

    let seats: Vec<_> = (4..=7).map(|number| sample::seat("C", number)).collect();
    for seat in &seats {
        wizard.select_seat(seat.clone()).await?;
    }
    wizard.set_ticket_type(TicketType::Adult, 2).await?;
    wizard.set_ticket_type(TicketType::Teen, 1).await?;
    wizard.set_ticket_type(TicketType::Child, 1).await?;

    let labels: Vec<_> = seats.iter().map(booking::Seat::label).collect();
    println!("Step 4: seats {}", labels.join(" "));
    println!("        total {}", wizard.total_price().await);

    if !wizard.can_advance().await {
        return Err("ticket counts do not match the selected seats".into());
    }
    wizard.next_step().await?;

    println!("Step 5: paying by card\n");
    match wizard.submit(PaymentMethod::Card).await? {
        SubmissionStatus::Confirmed(receipt) => {
            println!("Reservation confirmed:");
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        },
        SubmissionStatus::Failed(reason) => {
            println!("Reservation failed: {reason}");
        },
        status => {
            println!("Reservation still in progress: {status:?}");
        },
    }

    wizard.store().shutdown_default().await?;
    Ok(())
}
