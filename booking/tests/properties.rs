//! Property tests for the booking reducer.
//!
//! Random action sequences are reduced directly (no store) so each case runs
//! synchronously; the invariants are checked on the state left behind.

#![allow(clippy::unwrap_used)] // Tests can use unwrap

use booking::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, InMemoryReservationGateway,
    InMemorySession, Money, Seat, TicketType, sample,
};
use marquee_core::reducer::Reducer;
use marquee_testing::test_clock;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn environment() -> BookingEnvironment {
    let clock = Arc::new(test_clock());
    BookingEnvironment::new(
        clock.clone(),
        Arc::new(InMemorySession::new()),
        Arc::new(InMemoryReservationGateway::new(clock)),
    )
}

fn run(state: &mut BookingState, actions: Vec<BookingAction>, env: &BookingEnvironment) {
    let reducer = BookingReducer::new();
    for action in actions {
        let _ = reducer.reduce(state, action, env);
    }
}

fn arb_seat() -> impl Strategy<Value = Seat> {
    (0..sample::ROWS.len(), 1..=sample::SEATS_PER_ROW)
        .prop_map(|(row, number)| sample::seat(sample::ROWS[row], number))
}

fn arb_ticket_type() -> impl Strategy<Value = TicketType> {
    prop::sample::select(TicketType::ALL.to_vec())
}

/// Wizard actions that need no gateway round trip
fn arb_action() -> impl Strategy<Value = BookingAction> {
    let movies = sample::movies();
    let theaters = sample::theaters();
    let screenings: Vec<_> = movies
        .iter()
        .flat_map(|m| theaters.iter().flat_map(move |t| sample::screenings(m, t)))
        .collect();

    prop_oneof![
        prop::option::of(prop::sample::select(movies)).prop_map(BookingAction::SelectMovie),
        prop::option::of(prop::sample::select(theaters)).prop_map(BookingAction::SelectTheater),
        prop::option::of(Just(sample::showing_date())).prop_map(BookingAction::SelectDate),
        prop::option::of(prop::sample::select(screenings))
            .prop_map(BookingAction::SelectScreening),
        arb_seat().prop_map(BookingAction::SelectSeat),
        arb_seat().prop_map(BookingAction::UnselectSeat),
        (arb_ticket_type(), 0u32..6).prop_map(|(ticket_type, count)| {
            BookingAction::SetTicketType { ticket_type, count }
        }),
        Just(BookingAction::CalculatePrice),
        Just(BookingAction::NextStep),
        Just(BookingAction::PrevStep),
    ]
}

fn arb_actions() -> impl Strategy<Value = Vec<BookingAction>> {
    prop::collection::vec(arb_action(), 0..40)
}

proptest! {
    #[test]
    fn selecting_a_movie_resets_everything_downstream(
        history in arb_actions(),
        movie in prop::sample::select(sample::movies()),
    ) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, history, &env);
        run(&mut state, vec![BookingAction::SelectMovie(Some(movie.clone()))], &env);

        prop_assert_eq!(
            state,
            BookingState { selected_movie: Some(movie), ..BookingState::default() }
        );
    }

    #[test]
    fn selections_never_leave_downstream_choices(history in arb_actions()) {
        let env = environment();
        let reducer = BookingReducer::new();
        let mut state = BookingState::default();

        for action in history {
            let level = match &action {
                BookingAction::SelectMovie(_) => Some(0),
                BookingAction::SelectTheater(_) => Some(1),
                BookingAction::SelectDate(_) => Some(2),
                BookingAction::SelectScreening(_) => Some(3),
                _ => None,
            };
            let _ = reducer.reduce(&mut state, action, &env);

            if let Some(level) = level {
                if level < 1 { prop_assert!(state.selected_theater.is_none()); }
                if level < 2 { prop_assert!(state.selected_date.is_none()); }
                if level < 3 { prop_assert!(state.selected_screening.is_none()); }
                prop_assert!(state.selected_seats.is_empty());
                prop_assert!(state.ticket_types.is_empty());
            }
        }
    }

    #[test]
    fn total_always_matches_the_quote(history in arb_actions()) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, history, &env);

        prop_assert_eq!(state.total_price, state.quoted_price(&env.config.pricing));
    }

    #[test]
    fn no_screening_means_zero_price(
        adult in 0u32..10,
        teen in 0u32..10,
        child in 0u32..10,
    ) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, vec![
            BookingAction::SetTicketType { ticket_type: TicketType::Adult, count: adult },
            BookingAction::SetTicketType { ticket_type: TicketType::Teen, count: teen },
            BookingAction::SetTicketType { ticket_type: TicketType::Child, count: child },
            BookingAction::CalculatePrice,
        ], &env);

        prop_assert_eq!(state.total_price, Money::ZERO);
    }

    #[test]
    fn selected_seats_stay_unique(history in arb_actions()) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, history, &env);

        let ids: HashSet<_> = state.selected_seats.iter().map(|seat| seat.id).collect();
        prop_assert_eq!(ids.len(), state.selected_seats.len());
    }

    #[test]
    fn unselect_preserves_order_of_the_rest(
        seats in prop::collection::vec(arb_seat(), 1..12),
        victim in arb_seat(),
    ) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, seats.iter().cloned().map(BookingAction::SelectSeat).collect(), &env);
        let before: Vec<_> = state.selected_seats.clone();
        run(&mut state, vec![BookingAction::UnselectSeat(victim.clone())], &env);

        let expected: Vec<_> = before.into_iter().filter(|seat| seat.id != victim.id).collect();
        prop_assert_eq!(state.selected_seats, expected);
    }

    #[test]
    fn steps_floor_at_zero_and_grow_without_bound(forward in 0u32..50, back in 0u32..80) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, vec![BookingAction::NextStep; forward as usize], &env);
        prop_assert_eq!(state.current_step, forward);

        run(&mut state, vec![BookingAction::PrevStep; back as usize], &env);
        prop_assert_eq!(state.current_step, forward.saturating_sub(back));
    }

    #[test]
    fn reset_restores_the_initial_state(history in arb_actions()) {
        let env = environment();
        let mut state = BookingState::default();
        run(&mut state, history, &env);
        run(&mut state, vec![BookingAction::ResetBooking], &env);

        prop_assert_eq!(state, BookingState::default());
    }
}
