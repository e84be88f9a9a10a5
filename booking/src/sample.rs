//! Sample catalog.
//!
//! A small fixed set of movies, theaters, screenings and seats, used by the
//! demo binary and the tests. Real catalogs come from the REST layer.

use crate::types::{Money, Movie, MovieId, Screening, ScreeningId, Seat, SeatId, Theater, TheaterId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Rows in the sample auditorium
pub const ROWS: [&str; 4] = ["A", "B", "C", "D"];

/// Seats per row in the sample auditorium
pub const SEATS_PER_ROW: u32 = 8;

/// Showing date of every sample screening
#[must_use]
pub fn showing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or(NaiveDate::MIN)
}

/// Movies on offer
#[must_use]
pub fn movies() -> Vec<Movie> {
    vec![
        Movie::new(MovieId::new(1), "The Long Night", 128, "15"),
        Movie::new(MovieId::new(2), "Paper Lanterns", 96, "ALL"),
        Movie::new(MovieId::new(3), "Harbor Lights", 112, "12"),
    ]
}

/// Theaters on offer
#[must_use]
pub fn theaters() -> Vec<Theater> {
    vec![
        Theater::new(TheaterId::new(1), "Marquee Gangnam", "Seoul, Gangnam-gu"),
        Theater::new(TheaterId::new(2), "Marquee Haeundae", "Busan, Haeundae-gu"),
    ]
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    let local = showing_date()
        .and_hms_opt(hour, minute, 0)
        .unwrap_or(NaiveDateTime::MIN);
    Utc.from_utc_datetime(&local)
}

/// Screenings of `movie` at `theater` on [`showing_date`]
///
/// A morning showing at a reduced base price and an evening one at full price.
#[must_use]
pub fn screenings(movie: &Movie, theater: &Theater) -> Vec<Screening> {
    let base_id = movie.id.value() * 100 + theater.id.value() * 10;
    let capacity = u32::try_from(ROWS.len()).unwrap_or(0) * SEATS_PER_ROW;

    vec![
        Screening {
            id: ScreeningId::new(base_id + 1),
            movie_id: movie.id,
            theater_id: theater.id,
            screen_name: "Hall 1".to_string(),
            starts_at: at(10, 30),
            price: Money::new(9_000),
            total_seats: capacity,
            available_seats: capacity,
        },
        Screening {
            id: ScreeningId::new(base_id + 2),
            movie_id: movie.id,
            theater_id: theater.id,
            screen_name: "Hall 3".to_string(),
            starts_at: at(19, 40),
            price: Money::new(14_000),
            total_seats: capacity,
            available_seats: capacity - 5,
        },
    ]
}

/// Seat in the sample auditorium; ids are stable per label
#[must_use]
pub fn seat(row: &str, number: u32) -> Seat {
    let row_index = ROWS.iter().position(|r| *r == row).unwrap_or(ROWS.len());
    let row_index = u64::try_from(row_index).unwrap_or(u64::MAX / 1_000);
    Seat::new(SeatId::new(row_index * 1_000 + u64::from(number)), row, number)
}

/// Every seat of the sample auditorium, row by row
#[must_use]
pub fn seat_map() -> Vec<Seat> {
    ROWS.iter()
        .flat_map(|row| (1..=SEATS_PER_ROW).map(move |number| seat(row, number)))
        .collect()
}
