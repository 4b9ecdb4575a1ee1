pub mod booking_service;
pub mod directory;
pub mod help_service;
pub mod provider_service;
pub mod review_service;
pub mod user_service;
