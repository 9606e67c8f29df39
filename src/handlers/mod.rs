pub mod add_booking;
pub mod check;
pub mod health;
pub mod root;

pub use add_booking::add_booking_handler;
pub use check::check_handler;
pub use health::health_handler;
pub use root::root_handler;
