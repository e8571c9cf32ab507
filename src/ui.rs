//! Ratatui front-end for Lunchly: the customer list (all, top, search
//! results), a customer detail view with reservations, and popup forms for
//! adding and editing. Everything it shows comes from `db`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
