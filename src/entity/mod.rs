pub mod audit_logs;
pub mod bookings;
pub mod help_queries;
pub mod providers;
pub mod reviews;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use bookings::Entity as Bookings;
pub use help_queries::Entity as HelpQueries;
pub use providers::Entity as Providers;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
