//! Persistence module split across logical submodules.

mod connection;
mod customers;
mod policy;
mod reservations;

pub use connection::Store;
pub use customers::{CustomerDirectory, DEFAULT_TOP_LIMIT};
pub use policy::EmptyResults;
pub use reservations::ReservationBook;
