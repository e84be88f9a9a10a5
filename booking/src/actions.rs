//! Actions accepted by the booking wizard.

use crate::reservation::{PaymentMethod, ReservationReceipt};
use crate::types::{Movie, Screening, Seat, Theater, TicketType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every input the booking wizard accepts
///
/// Selection actions carry `Option`s: `None` clears that selection (and,
/// like any selection, everything downstream of it).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Selections ==========
    /// Pick or clear the movie; returns the wizard to the first step
    SelectMovie(Option<Movie>),

    /// Pick or clear the theater
    SelectTheater(Option<Theater>),

    /// Pick or clear the date
    SelectDate(Option<NaiveDate>),

    /// Pick or clear the screening
    SelectScreening(Option<Screening>),

    /// Add a seat to the selection
    SelectSeat(Seat),

    /// Remove a seat from the selection
    UnselectSeat(Seat),

    /// Set the number of tickets of one type
    SetTicketType {
        /// Ticket category
        ticket_type: TicketType,
        /// New count
        count: u32,
    },

    /// Recompute the total price
    CalculatePrice,

    // ========== Navigation ==========
    /// Advance one step
    NextStep,

    /// Go back one step
    PrevStep,

    /// Clear everything
    ResetBooking,

    // ========== Submission ==========
    /// Send the completed booking to the reservation service
    SubmitReservation {
        /// How the customer pays
        payment_method: PaymentMethod,
    },

    /// The reservation service accepted the booking
    ReservationConfirmed {
        /// Confirmation details
        receipt: ReservationReceipt,
    },

    /// The reservation service refused the booking
    ReservationFailed {
        /// Why it failed
        reason: String,
    },
}

impl BookingAction {
    /// Returns `true` for actions that change what the user has selected
    #[must_use]
    pub const fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::SelectMovie(_)
                | Self::SelectTheater(_)
                | Self::SelectDate(_)
                | Self::SelectScreening(_)
                | Self::SelectSeat(_)
                | Self::UnselectSeat(_)
                | Self::SetTicketType { .. }
        )
    }

    /// Returns `true` for the actions that end a submission
    #[must_use]
    pub const fn is_submission_outcome(&self) -> bool {
        matches!(
            self,
            Self::ReservationConfirmed { .. } | Self::ReservationFailed { .. }
        )
    }
}
