//! Reducer for the booking wizard.
//!
//! Selections form a chain: movie → theater → date → screening → seats.
//! Choosing (or clearing) a link invalidates every link after it and resets
//! ticket counts and the total. The total is recomputed synchronously by every
//! action that can change it, so it is never stale when the state is read.

use crate::actions::BookingAction;
use crate::environment::BookingEnvironment;
use crate::reservation::{PaymentMethod, ReservationError, ReservationRequest};
use crate::types::{BookingState, Money, SubmissionStatus, TicketCounts, WizardStep};
use marquee_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use thiserror::Error;

/// Why a booking cannot be submitted yet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// No user is signed in
    #[error("Sign in to complete the reservation")]
    NotSignedIn,

    /// A required selection is missing
    #[error("No {0} selected")]
    MissingSelection(&'static str),

    /// No seats are selected
    #[error("Select at least one seat")]
    NoSeats,

    /// Ticket counts do not cover the selected seats exactly
    #[error("{tickets} tickets chosen for {seats} seats")]
    TicketSeatMismatch {
        /// Total tickets requested
        tickets: u32,
        /// Seats selected
        seats: usize,
    },

    /// Nothing to charge
    #[error("Total price is zero")]
    ZeroTotal,
}

/// Position of a selection in the dependency chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Link {
    Movie,
    Theater,
    Date,
    Screening,
}

/// Reducer for the booking wizard
#[derive(Clone, Debug)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Clears every selection after `link`, plus seats, ticket counts and total
    fn invalidate_after(state: &mut BookingState, link: Link) {
        if link < Link::Theater {
            state.selected_theater = None;
        }
        if link < Link::Date {
            state.selected_date = None;
        }
        if link < Link::Screening {
            state.selected_screening = None;
        }
        state.selected_seats.clear();
        state.ticket_types = TicketCounts::default();
        state.total_price = Money::ZERO;

        tracing::debug!(?link, "Cleared downstream selections");
    }

    fn recalculate(state: &mut BookingState, env: &BookingEnvironment) {
        state.total_price = state.quoted_price(&env.config.pricing);
    }

    /// A new selection dismisses the outcome of the previous submission
    fn settle_submission(state: &mut BookingState) {
        if matches!(
            state.submission,
            SubmissionStatus::Confirmed(_) | SubmissionStatus::Failed(_)
        ) {
            state.submission = SubmissionStatus::Idle;
        }
    }

    /// Validates a `SubmitReservation` command and builds the request
    fn build_request(
        state: &BookingState,
        env: &BookingEnvironment,
        payment_method: PaymentMethod,
    ) -> Result<ReservationRequest, SubmissionError> {
        let user = env
            .session
            .current_user()
            .ok_or(SubmissionError::NotSignedIn)?;
        let movie = state
            .selected_movie
            .as_ref()
            .ok_or(SubmissionError::MissingSelection("movie"))?;
        let theater = state
            .selected_theater
            .as_ref()
            .ok_or(SubmissionError::MissingSelection("theater"))?;
        let date = state
            .selected_date
            .ok_or(SubmissionError::MissingSelection("date"))?;
        let screening = state
            .selected_screening
            .as_ref()
            .ok_or(SubmissionError::MissingSelection("screening"))?;

        if state.selected_seats.is_empty() {
            return Err(SubmissionError::NoSeats);
        }

        let tickets = state.ticket_types.total();
        if usize::try_from(tickets).ok() != Some(state.selected_seats.len()) {
            return Err(SubmissionError::TicketSeatMismatch {
                tickets,
                seats: state.selected_seats.len(),
            });
        }

        let total_price = state.quoted_price(&env.config.pricing);
        if total_price.is_zero() {
            return Err(SubmissionError::ZeroTotal);
        }

        Ok(ReservationRequest {
            user_id: user.id,
            movie_id: movie.id,
            theater_id: theater.id,
            screening_id: screening.id,
            date,
            seats: state.selected_seats.clone(),
            tickets: state.ticket_types,
            total_price,
            payment_method,
            requested_at: env.clock.now(),
        })
    }

    /// Effect that calls the gateway and reports the outcome as an action
    fn reserve(request: ReservationRequest, env: &BookingEnvironment) -> Effect<BookingAction> {
        let gateway = Arc::clone(&env.gateway);
        let timeout = env.config.submit_timeout();

        Effect::future(async move {
            let outcome = match tokio::time::timeout(timeout, gateway.reserve(request)).await {
                Ok(result) => result,
                Err(_) => Err(ReservationError::Timeout),
            };

            Some(match outcome {
                Ok(receipt) => BookingAction::ReservationConfirmed { receipt },
                Err(error) => BookingAction::ReservationFailed {
                    reason: error.to_string(),
                },
            })
        })
    }
}

impl Default for BookingReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per wizard action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Selections are frozen while the gateway holds the submitted copy
        if state.submission.is_pending() && action.is_selection() {
            tracing::debug!(?action, "Ignoring selection while a reservation is in flight");
            return SmallVec::new();
        }

        if action.is_selection() {
            Self::settle_submission(state);
        }

        match action {
            // ========== Selections ==========
            BookingAction::SelectMovie(movie) => {
                state.selected_movie = movie;
                Self::invalidate_after(state, Link::Movie);
                state.current_step = WizardStep::Movie.index();
            },

            BookingAction::SelectTheater(theater) => {
                state.selected_theater = theater;
                Self::invalidate_after(state, Link::Theater);
            },

            BookingAction::SelectDate(date) => {
                state.selected_date = date;
                Self::invalidate_after(state, Link::Date);
            },

            BookingAction::SelectScreening(screening) => {
                state.selected_screening = screening;
                Self::invalidate_after(state, Link::Screening);
                Self::recalculate(state, env);
            },

            BookingAction::SelectSeat(seat) => {
                if state.is_seat_selected(seat.id) {
                    tracing::debug!(seat = %seat.label(), "Seat already selected");
                } else {
                    state.selected_seats.push(seat);
                }
            },

            BookingAction::UnselectSeat(seat) => {
                state.selected_seats.retain(|selected| selected.id != seat.id);
            },

            BookingAction::SetTicketType { ticket_type, count } => {
                state.ticket_types.set(ticket_type, count);
                Self::recalculate(state, env);
            },

            BookingAction::CalculatePrice => {
                Self::recalculate(state, env);
            },

            // ========== Navigation ==========
            BookingAction::NextStep => {
                state.current_step = state.current_step.saturating_add(1);
            },

            BookingAction::PrevStep => {
                state.current_step = state.current_step.saturating_sub(1);
            },

            BookingAction::ResetBooking => {
                // An in-flight submission outlives the reset so it cannot be sent twice
                let submission = if state.submission.is_pending() {
                    SubmissionStatus::Pending
                } else {
                    SubmissionStatus::Idle
                };
                *state = BookingState {
                    submission,
                    ..BookingState::default()
                };
            },

            // ========== Submission ==========
            BookingAction::SubmitReservation { payment_method } => {
                if state.submission.is_pending() {
                    tracing::warn!("Reservation already in flight");
                    return SmallVec::new();
                }

                return match Self::build_request(state, env, payment_method) {
                    Ok(request) => {
                        tracing::info!(
                            screening_id = %request.screening_id,
                            seats = request.seats.len(),
                            total_price = %request.total_price,
                            "Submitting reservation"
                        );
                        state.submission = SubmissionStatus::Pending;
                        smallvec![Self::reserve(request, env)]
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Reservation not submitted");
                        state.submission = SubmissionStatus::Failed(error.to_string());
                        SmallVec::new()
                    },
                };
            },

            BookingAction::ReservationConfirmed { receipt } => {
                if !state.submission.is_pending() {
                    tracing::warn!(
                        reservation_id = %receipt.reservation_id,
                        "Ignoring confirmation without a pending submission"
                    );
                    return SmallVec::new();
                }
                tracing::info!(reservation_id = %receipt.reservation_id, "Booking complete");
                *state = BookingState {
                    submission: SubmissionStatus::Confirmed(receipt),
                    ..BookingState::default()
                };
            },

            BookingAction::ReservationFailed { reason } => {
                if state.submission.is_pending() {
                    tracing::warn!(%reason, "Reservation failed");
                    state.submission = SubmissionStatus::Failed(reason);
                } else {
                    tracing::debug!(%reason, "Ignoring failure without a pending submission");
                }
            },
        }

        SmallVec::new()
    }
}
