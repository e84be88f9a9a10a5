//! Reservation submission boundary.
//!
//! The wizard builds a [`ReservationRequest`] from a complete booking and hands
//! it to a [`ReservationGateway`]. The real gateway (REST reservations and
//! payments endpoints) lives outside this crate; [`InMemoryReservationGateway`]
//! stands in for it in development and tests.

use crate::session::UserId;
use crate::types::{Money, MovieId, ScreeningId, Seat, TheaterId, TicketCounts};
use chrono::{DateTime, NaiveDate, Utc};
use marquee_core::environment::Clock;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a confirmed reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the customer pays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,
    /// Bank transfer
    BankTransfer,
    /// Mobile wallet
    MobileWallet,
}

/// Payload sent to the reservation service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Booking user
    pub user_id: UserId,
    /// Movie being booked
    pub movie_id: MovieId,
    /// Theater of the screening
    pub theater_id: TheaterId,
    /// Screening being booked
    pub screening_id: ScreeningId,
    /// Date picked in the wizard
    pub date: NaiveDate,
    /// Seats in selection order
    pub seats: Vec<Seat>,
    /// Ticket quantities
    pub tickets: TicketCounts,
    /// Price quoted to the user
    pub total_price: Money,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// When the user submitted
    pub requested_at: DateTime<Utc>,
}

/// Confirmation returned by the reservation service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationReceipt {
    /// Reservation identifier
    pub reservation_id: ReservationId,
    /// Screening booked
    pub screening_id: ScreeningId,
    /// Seat labels such as `A1`
    pub seat_labels: Vec<String>,
    /// Amount charged
    pub total_price: Money,
    /// When the reservation was confirmed
    pub confirmed_at: DateTime<Utc>,
}

/// Reasons a reservation can fail at the service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// The service refused the reservation
    #[error("Reservation rejected: {reason}")]
    Rejected {
        /// Reason reported by the service
        reason: String,
    },

    /// Some seats were taken before the reservation went through
    #[error("Seats no longer available: {}", .seats.join(", "))]
    SeatsUnavailable {
        /// Labels of the seats that were taken
        seats: Vec<String>,
    },

    /// The service did not answer in time
    #[error("Reservation service timed out")]
    Timeout,

    /// The request could not be delivered
    #[error("Reservation service unreachable: {0}")]
    Transport(String),
}

/// Reservation gateway result
pub type GatewayResult<T> = Result<T, ReservationError>;

/// Reservation gateway trait
///
/// Abstraction over the backend reservation and payment endpoints.
pub trait ReservationGateway: Send + Sync {
    /// Reserve seats and charge the customer
    ///
    /// # Errors
    ///
    /// Returns error if the service refuses or cannot be reached
    fn reserve(
        &self,
        request: ReservationRequest,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<ReservationReceipt>> + Send>>;
}

/// In-memory gateway (confirms every request unless told to fail)
///
/// Keeps every request it receives so tests can inspect the payload.
#[derive(Clone)]
pub struct InMemoryReservationGateway {
    clock: Arc<dyn Clock>,
    requests: Arc<Mutex<Vec<ReservationRequest>>>,
    failure: Arc<Mutex<Option<ReservationError>>>,
}

impl InMemoryReservationGateway {
    /// Creates a gateway stamping receipts with `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Fail every subsequent request with `error`
    pub fn fail_with(&self, error: ReservationError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Confirm subsequent requests again
    pub fn succeed(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Every request received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ReservationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for InMemoryReservationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryReservationGateway")
            .field("requests", &self.requests().len())
            .finish_non_exhaustive()
    }
}

impl ReservationGateway for InMemoryReservationGateway {
    fn reserve(
        &self,
        request: ReservationRequest,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<ReservationReceipt>> + Send>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let failure = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let confirmed_at = self.clock.now();

        Box::pin(async move {
            if let Some(error) = failure {
                tracing::warn!(screening_id = %request.screening_id, %error, "Reservation refused");
                return Err(error);
            }

            let receipt = ReservationReceipt {
                reservation_id: ReservationId::new(),
                screening_id: request.screening_id,
                seat_labels: request.seats.iter().map(Seat::label).collect(),
                total_price: request.total_price,
                confirmed_at,
            };

            tracing::info!(
                reservation_id = %receipt.reservation_id,
                total_price = %receipt.total_price,
                "Reservation confirmed"
            );

            Ok(receipt)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SeatId;
    use marquee_testing::test_clock;

    fn request() -> ReservationRequest {
        ReservationRequest {
            user_id: UserId::new(),
            movie_id: MovieId::new(10),
            theater_id: TheaterId::new(20),
            screening_id: ScreeningId::new(30),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            seats: vec![
                Seat::new(SeatId::new(1), "B", 4),
                Seat::new(SeatId::new(2), "B", 5),
            ],
            tickets: TicketCounts::new(2, 0, 0),
            total_price: Money::new(28_000),
            payment_method: PaymentMethod::Card,
            requested_at: test_clock().now(),
        }
    }

    #[tokio::test]
    async fn confirms_and_records_requests() {
        let gateway = InMemoryReservationGateway::new(Arc::new(test_clock()));

        let receipt = gateway.reserve(request()).await.unwrap();

        assert_eq!(receipt.seat_labels, vec!["B4", "B5"]);
        assert_eq!(receipt.total_price, Money::new(28_000));
        assert_eq!(receipt.confirmed_at, test_clock().now());
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn fails_until_told_to_succeed() {
        let gateway = InMemoryReservationGateway::new(Arc::new(test_clock()));
        gateway.fail_with(ReservationError::SeatsUnavailable {
            seats: vec!["B4".to_string()],
        });

        let error = gateway.reserve(request()).await.unwrap_err();
        assert_eq!(error.to_string(), "Seats no longer available: B4");

        gateway.succeed();
        assert!(gateway.reserve(request()).await.is_ok());
        assert_eq!(gateway.requests().len(), 2);
    }

    #[test]
    fn request_payload_uses_snake_case_payment_method() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["payment_method"], "card");
        assert_eq!(json["tickets"]["adult"], 2);
        assert_eq!(json["date"], "2025-01-01");
    }
}
