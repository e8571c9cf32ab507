//! Core library surface for Lunchly, a small restaurant reservation manager.
//!
//! The `db` module holds the customer directory and the reservation book on
//! top of an embedded SQLite store; `ui` is the terminal front-end and
//! `config` reads the optional settings file.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

/// Persistence entry points used by `main.rs` and the integration tests.
pub use db::{CustomerDirectory, EmptyResults, ReservationBook, Store, DEFAULT_TOP_LIMIT};

pub use error::{DirectoryError, NotFound, ReservationError};

/// Domain types shared by every layer.
pub use models::{Customer, CustomerId, Identity, RankedCustomer, Reservation, ReservationId};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
