//! Domain models that mirror the SQLite schema and get passed between the
//! directory, the TUI, and the CLI. They stay light-weight data holders; all
//! querying lives in `db`.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::ReservationError;

/// Persistence state of an entity. A record starts out `Unsaved` and only the
/// persistence layer moves it to `Persisted` once the store has assigned an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<Id> {
    Unsaved,
    Persisted(Id),
}

impl<Id: Copy> Identity<Id> {
    /// The store-assigned id, if the record has been written at least once.
    pub fn id(&self) -> Option<Id> {
        match self {
            Identity::Unsaved => None,
            Identity::Persisted(id) => Some(*id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Identity::Persisted(_))
    }
}

/// Primary key of a row in the `customers` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary key of a row in the `reservations` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationId(pub i64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patron of the restaurant.
///
/// The name components are optional because legacy rows may lack one of them;
/// forms in the UI always require both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    identity: Identity<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    /// Build an unsaved customer from user input.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            phone: None,
            notes: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Hydrate a customer from a stored row.
    pub(crate) fn from_row(
        id: CustomerId,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            identity: Identity::Persisted(id),
            first_name,
            last_name,
            phone,
            notes,
        }
    }

    pub fn identity(&self) -> Identity<CustomerId> {
        self.identity
    }

    pub fn id(&self) -> Option<CustomerId> {
        self.identity.id()
    }

    /// Record the id handed out by the store after the first insert.
    pub(crate) fn mark_persisted(&mut self, id: CustomerId) {
        self.identity = Identity::Persisted(id);
    }

    /// `"{first} {last}"` exactly as stored. Yields `None` rather than papering
    /// over a missing component.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }

    /// Case-folded candidate string used by name search. A missing component
    /// counts as empty so the surviving one stays searchable.
    pub fn search_text(&self) -> String {
        search_text(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Name for lists and headings. Falls back to whatever parts exist.
    pub fn display_name(&self) -> String {
        self.full_name().unwrap_or_else(|| {
            let text = format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default()
            );
            let trimmed = text.trim();
            if trimmed.is_empty() {
                "(unnamed)".to_string()
            } else {
                trimmed.to_string()
            }
        })
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unicode case folding shared by name search and name ordering. Final sigma
/// folds to `σ` so a query matches no matter where the word ends.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase().replace('ς', "σ")
}

/// `"{first} {last}"` folded for search, with missing parts left empty. The
/// store registers this as an SQL function so queries use the same text.
pub(crate) fn search_text(first_name: Option<&str>, last_name: Option<&str>) -> String {
    fold_case(&format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    ))
}

/// Row returned by the "top customers" query: identity plus the number of
/// reservations the customer holds. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCustomer {
    pub id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub reservation_count: i64,
}

impl RankedCustomer {
    pub fn display_name(&self) -> String {
        let text = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        text.trim().to_string()
    }
}

/// A table booking owned by one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    identity: Identity<ReservationId>,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: u32,
    pub notes: Option<String>,
}

impl Reservation {
    /// Build an unsaved reservation. A party needs at least one guest.
    pub fn new(
        customer_id: CustomerId,
        start_at: NaiveDateTime,
        num_guests: u32,
        notes: Option<String>,
    ) -> Result<Self, ReservationError> {
        if num_guests == 0 {
            return Err(ReservationError::NoGuests);
        }
        Ok(Self {
            identity: Identity::Unsaved,
            customer_id,
            start_at,
            num_guests,
            notes,
        })
    }

    pub(crate) fn from_row(
        id: ReservationId,
        customer_id: CustomerId,
        start_at: NaiveDateTime,
        num_guests: u32,
        notes: Option<String>,
    ) -> Self {
        Self {
            identity: Identity::Persisted(id),
            customer_id,
            start_at,
            num_guests,
            notes,
        }
    }

    pub fn identity(&self) -> Identity<ReservationId> {
        self.identity
    }

    pub fn id(&self) -> Option<ReservationId> {
        self.identity.id()
    }

    pub(crate) fn mark_persisted(&mut self, id: ReservationId) {
        self.identity = Identity::Persisted(id);
    }

    /// Start time in a friendly form, e.g. `January 5, 2026, 7:30 PM`.
    pub fn formatted_start_at(&self) -> String {
        self.start_at.format("%B %-d, %Y, %-I:%M %p").to_string()
    }
}
