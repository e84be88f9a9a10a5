//! # Marquee Booking
//!
//! Movie ticket booking wizard built as a Marquee reducer.
//!
//! A booking walks through five steps: movie, theater, date and time, seats,
//! payment. Every user interaction is a [`BookingAction`]; [`BookingReducer`]
//! applies it to [`BookingState`], clearing selections that no longer make
//! sense and keeping the total price in step with the ticket counts.
//!
//! ## Example
//!
//! ```ignore
//! use booking::{BookingEnvironment, BookingWizard, sample};
//!
//! let wizard = BookingWizard::new(environment);
//! wizard.select_movie(Some(sample::movies()[0].clone())).await?;
//! wizard.next_step().await?;
//!
//! let state = wizard.snapshot().await;
//! assert_eq!(state.current_step, 1);
//! ```

pub mod actions;
pub mod config;
pub mod environment;
pub mod pricing;
pub mod reducer;
pub mod reservation;
pub mod sample;
pub mod session;
pub mod types;
pub mod wizard;

pub use actions::BookingAction;
pub use config::{BookingConfig, ConfigError};
pub use environment::BookingEnvironment;
pub use pricing::{PriceLine, PricingRules};
pub use reducer::{BookingReducer, SubmissionError};
pub use reservation::{
    InMemoryReservationGateway, PaymentMethod, ReservationError, ReservationGateway,
    ReservationId, ReservationReceipt, ReservationRequest,
};
pub use session::{InMemorySession, SessionProvider, UserId, UserProfile};
pub use types::{
    BookingState, Money, Movie, MovieId, Screening, ScreeningId, Seat, SeatId,
    SubmissionStatus, Theater, TheaterId, TicketCounts, TicketType, WizardStep,
};
pub use wizard::{BookingStore, BookingWizard};
