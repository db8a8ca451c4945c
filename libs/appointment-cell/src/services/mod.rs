pub mod booking;
pub mod validation;

pub use booking::BookingService;
pub use validation::validate_appointment;
