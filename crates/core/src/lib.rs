//! # Slotbook Core
//!
//! Domain types and the slot availability computation shared by the
//! database and API crates.
//!
//! - [`models`]: services, opening hours, offers, employees, bookings and
//!   the request/response shapes exchanged over HTTP
//! - [`availability`]: the fixed-step slot scan and the lookups it reads from
//! - [`placement`]: turning a requested start time into a validated booking
//! - [`errors`]: the domain error type

pub mod availability;
pub mod errors;
pub mod models;
pub mod placement;

pub use availability::{
    AvailabilitySlotComputer, ConflictingBookingsLookup, CurrentUserProvider, OpeningHoursLookup,
    UserBookingsLookup,
};
pub use errors::{BookingError, BookingResult};

/// Identity of a customer requesting slots or bookings.
pub type CustomerId = uuid::Uuid;
