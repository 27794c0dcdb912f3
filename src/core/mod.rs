/// Core functionality modules
///
/// Thin services over the query layer: input validation, logging,
/// and foreign-key checks with friendly errors.

pub mod accounts;
pub mod bookings;
pub mod listings;

pub use accounts::Accounts;
pub use bookings::Bookings;
pub use listings::Listings;
