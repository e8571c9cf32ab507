use std::cmp::min;

use crate::models::{Customer, CustomerId, RankedCustomer, Reservation};

/// Which query filled the customer list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ListView {
    All,
    Top,
    Search(String),
}

impl ListView {
    pub(crate) fn title(&self) -> String {
        match self {
            ListView::All => "Customers".to_string(),
            ListView::Top => "Top Customers".to_string(),
            ListView::Search(query) => format!("Customers matching \"{query}\""),
        }
    }
}

/// One line of the customer list. Rows from the ranking carry a reservation
/// count instead of a phone number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CustomerRow {
    pub(crate) id: CustomerId,
    pub(crate) name: String,
    pub(crate) detail: String,
}

impl CustomerRow {
    pub(crate) fn from_customer(customer: &Customer) -> Option<Self> {
        Some(Self {
            id: customer.id()?,
            name: customer.display_name(),
            detail: customer.phone.clone().unwrap_or_default(),
        })
    }

    pub(crate) fn from_ranked(ranked: &RankedCustomer) -> Self {
        let noun = if ranked.reservation_count == 1 {
            "reservation"
        } else {
            "reservations"
        };
        Self {
            id: ranked.id,
            name: ranked.display_name(),
            detail: format!("{} {noun}", ranked.reservation_count),
        }
    }
}

/// Scrollable customer list shown on the home screen, the ranking, and search
/// results.
pub(crate) struct CustomerListScreen {
    pub(crate) view: ListView,
    pub(crate) rows: Vec<CustomerRow>,
    pub(crate) selected: usize,
}

impl CustomerListScreen {
    pub(crate) fn new(view: ListView, rows: Vec<CustomerRow>) -> Self {
        Self {
            view,
            rows,
            selected: 0,
        }
    }

    pub(crate) fn current_row(&self) -> Option<&CustomerRow> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = shift_index(self.selected, self.rows.len(), offset);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Move the cursor onto `id` if it is in the list.
    pub(crate) fn focus(&mut self, id: CustomerId) {
        if let Some(idx) = self.rows.iter().position(|row| row.id == id) {
            self.selected = idx;
        }
    }
}

/// Detail view for one customer plus their reservations.
pub(crate) struct CustomerScreen {
    pub(crate) customer: Customer,
    pub(crate) reservations: Vec<Reservation>,
    pub(crate) selected: usize,
    /// List to go back to when leaving the detail view.
    pub(crate) origin: ListView,
}

impl CustomerScreen {
    pub(crate) fn new(customer: Customer, reservations: Vec<Reservation>, origin: ListView) -> Self {
        Self {
            customer,
            reservations,
            selected: 0,
            origin,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = shift_index(self.selected, self.reservations.len(), offset);
    }
}

/// Clamp `current + offset` into `0..len`.
fn shift_index(current: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = current as isize + offset;
    if moved < 0 {
        0
    } else {
        min(moved as usize, len - 1)
    }
}
