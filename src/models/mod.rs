pub mod booking;
pub mod lenient;
pub mod timestamp;

pub use booking::{Booking, BookingInput, DEFAULT_STATUS};
