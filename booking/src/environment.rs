//! Injected dependencies for the booking reducer.

use crate::config::BookingConfig;
use crate::reservation::ReservationGateway;
use crate::session::SessionProvider;
use marquee_core::environment::Clock;
use std::sync::Arc;

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for request timestamps
    pub clock: Arc<dyn Clock>,
    /// Current user session
    pub session: Arc<dyn SessionProvider>,
    /// Reservation service
    pub gateway: Arc<dyn ReservationGateway>,
    /// Pricing and timeouts
    pub config: BookingConfig,
}

impl BookingEnvironment {
    /// Creates an environment with the default configuration
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        session: Arc<dyn SessionProvider>,
        gateway: Arc<dyn ReservationGateway>,
    ) -> Self {
        Self {
            clock,
            session,
            gateway,
            config: BookingConfig::default(),
        }
    }

    /// Replaces the configuration
    #[must_use]
    pub fn with_config(mut self, config: BookingConfig) -> Self {
        self.config = config;
        self
    }
}

impl std::fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEnvironment")
            .field("signed_in", &self.session.is_signed_in())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
