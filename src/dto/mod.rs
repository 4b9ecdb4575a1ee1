pub mod bookings;
pub mod help;
pub mod providers;
pub mod reviews;
pub mod users;
