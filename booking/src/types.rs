//! Domain types for the booking wizard.
//!
//! Catalog entities (`Movie`, `Theater`, `Screening`, `Seat`) arrive from the
//! REST layer already deserialized; the wizard only stores and compares them.
//! `BookingState` is the single aggregate the wizard owns.

use crate::pricing::PricingRules;
use crate::reservation::ReservationReceipt;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a backend identifier
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw backend identifier
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Backend identifier of a movie
    MovieId
);
numeric_id!(
    /// Backend identifier of a theater
    TheaterId
);
numeric_id!(
    /// Backend identifier of a screening
    ScreeningId
);
numeric_id!(
    /// Backend identifier of a seat
    SeatId
);

/// Amount of money in the smallest currency unit (e.g. won)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount is zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtracts, flooring at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Adds, capping at the maximum representable amount
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by a ticket count, capping at the maximum representable amount
    #[must_use]
    #[allow(clippy::cast_lossless)] // u64::from is not const
    pub const fn saturating_mul(self, count: u32) -> Self {
        Self(self.0.saturating_mul(count as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A film that can be booked
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Backend identifier
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Running time in minutes
    pub running_minutes: u32,
    /// Age rating label (e.g. "12", "15", "ALL")
    pub age_rating: String,
}

impl Movie {
    /// Creates a movie
    #[must_use]
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        running_minutes: u32,
        age_rating: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            running_minutes,
            age_rating: age_rating.into(),
        }
    }
}

/// A venue showing movies
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    /// Backend identifier
    pub id: TheaterId,
    /// Display name
    pub name: String,
    /// Address or area
    pub location: String,
}

impl Theater {
    /// Creates a theater
    #[must_use]
    pub fn new(id: TheaterId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A scheduled showing of a movie at a theater
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screening {
    /// Backend identifier
    pub id: ScreeningId,
    /// Movie being shown
    pub movie_id: MovieId,
    /// Theater hosting the showing
    pub theater_id: TheaterId,
    /// Auditorium label
    pub screen_name: String,
    /// Start time
    pub starts_at: DateTime<Utc>,
    /// Base (adult) ticket price
    pub price: Money,
    /// Seat capacity of the auditorium
    pub total_seats: u32,
    /// Seats still available
    pub available_seats: u32,
}

impl Screening {
    /// Calendar date of the showing
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }

    /// Returns `true` once no seats remain
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

/// A single seat in an auditorium
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Backend identifier; seats are compared by id only
    pub id: SeatId,
    /// Row letter(s)
    pub row: String,
    /// Seat number within the row
    pub number: u32,
}

impl Seat {
    /// Creates a seat
    #[must_use]
    pub fn new(id: SeatId, row: impl Into<String>, number: u32) -> Self {
        Self {
            id,
            row: row.into(),
            number,
        }
    }

    /// Human readable label such as `A1`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

/// Ticket category with its own price adjustment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// Full price
    Adult,
    /// Teen discount
    Teen,
    /// Child discount
    Child,
}

impl TicketType {
    /// Every ticket type in display order
    pub const ALL: [Self; 3] = [Self::Adult, Self::Teen, Self::Child];

    /// Lowercase key used in payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Teen => "teen",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested ticket quantities per type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    /// Adult tickets
    pub adult: u32,
    /// Teen tickets
    pub teen: u32,
    /// Child tickets
    pub child: u32,
}

impl TicketCounts {
    /// Creates counts from explicit values
    #[must_use]
    pub const fn new(adult: u32, teen: u32, child: u32) -> Self {
        Self { adult, teen, child }
    }

    /// Count for one ticket type
    #[must_use]
    pub const fn get(&self, ticket_type: TicketType) -> u32 {
        match ticket_type {
            TicketType::Adult => self.adult,
            TicketType::Teen => self.teen,
            TicketType::Child => self.child,
        }
    }

    /// Replaces the count for one ticket type
    pub fn set(&mut self, ticket_type: TicketType, count: u32) {
        match ticket_type {
            TicketType::Adult => self.adult = count,
            TicketType::Teen => self.teen = count,
            TicketType::Child => self.child = count,
        }
    }

    /// Total number of tickets
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.adult.saturating_add(self.teen).saturating_add(self.child)
    }

    /// Returns `true` when no tickets are requested
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The five linear stages of the booking flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    /// Pick a movie
    Movie,
    /// Pick a theater
    Theater,
    /// Pick a date and screening
    DateTime,
    /// Pick seats and ticket types
    Seat,
    /// Review and pay
    Payment,
}

impl WizardStep {
    /// Every step in order
    pub const ALL: [Self; 5] = [
        Self::Movie,
        Self::Theater,
        Self::DateTime,
        Self::Seat,
        Self::Payment,
    ];

    /// Zero-based index of the step
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Movie => 0,
            Self::Theater => 1,
            Self::DateTime => 2,
            Self::Seat => 3,
            Self::Payment => 4,
        }
    }

    /// Step for an index, `None` past the last step
    #[must_use]
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Movie),
            1 => Some(Self::Theater),
            2 => Some(Self::DateTime),
            3 => Some(Self::Seat),
            4 => Some(Self::Payment),
            _ => None,
        }
    }

    /// Title shown in the step indicator
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Theater => "Theater",
            Self::DateTime => "Date & Time",
            Self::Seat => "Seats",
            Self::Payment => "Payment",
        }
    }

    /// Following step, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding step, if any
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self.index() {
            0 => None,
            i => Self::from_index(i - 1),
        }
    }
}

/// Progress of the reservation submitted from the payment step
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Nothing submitted
    #[default]
    Idle,
    /// Waiting for the reservation service
    Pending,
    /// Reservation accepted
    Confirmed(ReservationReceipt),
    /// Submission rejected locally or by the service
    Failed(String),
}

impl SubmissionStatus {
    /// Returns `true` while a submission is in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// State of the booking wizard
///
/// Selections form a dependency chain (movie → theater → date → screening →
/// seats). `total_price` is derived from `selected_screening` and
/// `ticket_types` and is only ever written by the reducer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    /// Chosen film
    pub selected_movie: Option<Movie>,
    /// Chosen theater
    pub selected_theater: Option<Theater>,
    /// Chosen date
    pub selected_date: Option<NaiveDate>,
    /// Chosen screening
    pub selected_screening: Option<Screening>,
    /// Chosen seats in selection order, unique by id
    pub selected_seats: Vec<Seat>,
    /// Requested ticket quantities
    pub ticket_types: TicketCounts,
    /// Derived total price
    pub total_price: Money,
    /// Index into the step sequence; may run past the last step
    pub current_step: u32,
    /// Reservation submission progress
    pub submission: SubmissionStatus,
}

impl BookingState {
    /// Creates an empty booking
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step, `None` when `current_step` has run past the last step
    #[must_use]
    pub const fn step(&self) -> Option<WizardStep> {
        WizardStep::from_index(self.current_step)
    }

    /// Checks whether a seat is selected
    #[must_use]
    pub fn is_seat_selected(&self, id: SeatId) -> bool {
        self.selected_seats.iter().any(|seat| seat.id == id)
    }

    /// Number of selected seats
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.selected_seats.len()
    }

    /// Price computed from the current screening and ticket counts
    #[must_use]
    pub fn quoted_price(&self, pricing: &PricingRules) -> Money {
        pricing.quote(self.selected_screening.as_ref(), &self.ticket_types)
    }

    /// Whether the selection required by the current step is complete
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step() {
            Some(WizardStep::Movie) => self.selected_movie.is_some(),
            Some(WizardStep::Theater) => self.selected_theater.is_some(),
            Some(WizardStep::DateTime) => {
                self.selected_date.is_some() && self.selected_screening.is_some()
            },
            Some(WizardStep::Seat) => {
                !self.selected_seats.is_empty()
                    && usize::try_from(self.ticket_types.total())
                        .is_ok_and(|tickets| tickets == self.selected_seats.len())
            },
            Some(WizardStep::Payment) | None => false,
        }
    }
}
