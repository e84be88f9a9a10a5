//! Async facade over the booking store.
//!
//! `BookingWizard` is what a UI holds: one method per wizard operation, each
//! dispatching a [`BookingAction`] through the store. Clones share the same
//! state, and the store serializes concurrent calls.

use crate::actions::BookingAction;
use crate::environment::BookingEnvironment;
use crate::reducer::BookingReducer;
use crate::reservation::PaymentMethod;
use crate::types::{
    BookingState, Money, Movie, Screening, Seat, SubmissionStatus, Theater, TicketType,
    WizardStep,
};
use chrono::NaiveDate;
use marquee_runtime::{Store, StoreError};
use std::time::Duration;

/// Store specialised to the booking wizard
pub type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

/// Slack on top of the gateway timeout before `submit` gives up waiting
const SUBMIT_WAIT_MARGIN: Duration = Duration::from_secs(1);

/// Shared handle to one booking in progress
#[derive(Clone)]
pub struct BookingWizard {
    store: BookingStore,
}

impl BookingWizard {
    /// Starts an empty booking
    #[must_use]
    pub fn new(environment: BookingEnvironment) -> Self {
        Self::from_store(Store::new(
            BookingState::default(),
            BookingReducer::new(),
            environment,
        ))
    }

    /// Wraps an existing store
    #[must_use]
    pub const fn from_store(store: BookingStore) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &BookingStore {
        &self.store
    }

    async fn dispatch(&self, action: BookingAction) -> Result<(), StoreError> {
        self.store.send(action).await.map(drop)
    }

    /// Choose a movie, or clear it with `None`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_movie(&self, movie: Option<Movie>) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SelectMovie(movie)).await
    }

    /// Choose a theater, or clear it with `None`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_theater(&self, theater: Option<Theater>) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SelectTheater(theater)).await
    }

    /// Choose a date, or clear it with `None`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_date(&self, date: Option<NaiveDate>) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SelectDate(date)).await
    }

    /// Choose a screening, or clear it with `None`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_screening(&self, screening: Option<Screening>) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SelectScreening(screening)).await
    }

    /// Add a seat
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn select_seat(&self, seat: Seat) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SelectSeat(seat)).await
    }

    /// Remove a seat
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn unselect_seat(&self, seat: Seat) -> Result<(), StoreError> {
        self.dispatch(BookingAction::UnselectSeat(seat)).await
    }

    /// Set how many tickets of one type to buy
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn set_ticket_type(
        &self,
        ticket_type: TicketType,
        count: u32,
    ) -> Result<(), StoreError> {
        self.dispatch(BookingAction::SetTicketType { ticket_type, count })
            .await
    }

    /// Recompute the total price
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn calculate_price(&self) -> Result<(), StoreError> {
        self.dispatch(BookingAction::CalculatePrice).await
    }

    /// Advance one step
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn next_step(&self) -> Result<(), StoreError> {
        self.dispatch(BookingAction::NextStep).await
    }

    /// Go back one step
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn prev_step(&self) -> Result<(), StoreError> {
        self.dispatch(BookingAction::PrevStep).await
    }

    /// Start over
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn reset_booking(&self) -> Result<(), StoreError> {
        self.dispatch(BookingAction::ResetBooking).await
    }

    /// Submit the booking and wait for the reservation service to answer
    ///
    /// Validation failures come back immediately as
    /// [`SubmissionStatus::Failed`]; otherwise this waits until the outcome has
    /// been reduced into the state.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
    /// - [`StoreError::Timeout`]: the outcome did not arrive in time
    #[tracing::instrument(skip(self))]
    pub async fn submit(
        &self,
        payment_method: PaymentMethod,
    ) -> Result<SubmissionStatus, StoreError> {
        let wait = self
            .store
            .environment()
            .config
            .submit_timeout()
            .saturating_add(SUBMIT_WAIT_MARGIN);

        let mut handle = self
            .store
            .send(BookingAction::SubmitReservation { payment_method })
            .await?;
        handle.wait_with_timeout(wait).await?;

        Ok(self.store.state(|s| s.submission.clone()).await)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> BookingState {
        self.store.state(BookingState::clone).await
    }

    /// Current total price
    pub async fn total_price(&self) -> Money {
        self.store.state(|s| s.total_price).await
    }

    /// Current step index
    pub async fn current_step(&self) -> u32 {
        self.store.state(|s| s.current_step).await
    }

    /// Current step, if the index names one
    pub async fn step(&self) -> Option<WizardStep> {
        self.store.state(BookingState::step).await
    }

    /// Whether the current step is complete enough to move on
    pub async fn can_advance(&self) -> bool {
        self.store.state(BookingState::can_advance).await
    }
}

impl std::fmt::Debug for BookingWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingWizard")
            .field("environment", self.store.environment())
            .finish_non_exhaustive()
    }
}
