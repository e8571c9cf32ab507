use rusqlite::{params, OptionalExtension, Row};

use crate::error::{NotFound, Result};
use crate::models::{fold_case, Customer, CustomerId, Identity, RankedCustomer, Reservation};

use super::{EmptyResults, ReservationBook, Store};

/// Size of the "top customers" ranking when the caller has no preference.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Queries and the single write path for customer records.
///
/// Every call is one round-trip to the store; errors from SQLite come back
/// unchanged and nothing is retried or logged here.
pub struct CustomerDirectory<'s> {
    store: &'s Store,
    empty_results: EmptyResults,
}

impl<'s> CustomerDirectory<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            empty_results: EmptyResults::default(),
        }
    }

    /// Choose how search and ranking report an empty result.
    pub fn with_empty_results(mut self, policy: EmptyResults) -> Self {
        self.empty_results = policy;
        self
    }

    /// Every customer, ordered by last name then first name, ignoring case.
    /// Missing names sort after present ones; equal names keep insertion order.
    pub fn list(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT id, first_name, last_name, phone, notes
             FROM customers
             ORDER BY last_name IS NULL, name_key(last_name),
                      first_name IS NULL, name_key(first_name),
                      id",
        )?;

        let customers = stmt
            .query_map([], customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(customers)
    }

    /// The customer stored under `id`.
    pub fn get_by_id(&self, id: CustomerId) -> Result<Customer> {
        self.store
            .conn()
            .query_row(
                "SELECT id, first_name, last_name, phone, notes
                 FROM customers
                 WHERE id = ?1",
                [id.0],
                customer_from_row,
            )
            .optional()?
            .ok_or_else(|| NotFound::Customer(id).into())
    }

    /// Up to `limit` customers with the most reservations, busiest first.
    /// Customers without reservations never appear; ties come back in store
    /// order. A `limit` of zero yields no rows, which the default policy
    /// reports as [`NotFound::Ranking`].
    pub fn top_ranked(&self, limit: usize) -> Result<Vec<RankedCustomer>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.store.conn().prepare(
            "SELECT c.id, c.first_name, c.last_name, count(r.id) AS reservation_count
             FROM customers c
             INNER JOIN reservations r ON r.customer_id = c.id
             GROUP BY c.id, c.first_name, c.last_name
             ORDER BY reservation_count DESC
             LIMIT ?1",
        )?;

        let ranked = stmt
            .query_map([limit], |row| {
                Ok(RankedCustomer {
                    id: CustomerId(row.get(0)?),
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    reservation_count: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        self.empty_results.check(ranked, || NotFound::Ranking)
    }

    /// [`top_ranked`](Self::top_ranked) with [`DEFAULT_TOP_LIMIT`].
    pub fn top_ten(&self) -> Result<Vec<RankedCustomer>> {
        self.top_ranked(DEFAULT_TOP_LIMIT)
    }

    /// Customers whose `"first last"` name contains `query`, ignoring case in
    /// any script. Each row is matched on [`Customer::search_text`], so a
    /// missing name part counts as empty. No ordering is promised.
    pub fn search(&self, query: &str) -> Result<Vec<Customer>> {
        let pattern = format!("%{}%", escape_like(&fold_case(query)));
        let mut stmt = self.store.conn().prepare(
            "SELECT id, first_name, last_name, phone, notes
             FROM customers
             WHERE customer_search_text(first_name, last_name) LIKE ?1 ESCAPE '\\'",
        )?;

        let customers = stmt
            .query_map([pattern], customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        self.empty_results
            .check(customers, || NotFound::Search(query.to_string()))
    }

    /// Insert an unsaved customer and stamp the new id onto it, or overwrite
    /// all four fields of a persisted one. Updating an id that no longer
    /// exists is a silent no-op.
    pub fn save(&self, customer: &mut Customer) -> Result<()> {
        let conn = self.store.conn();
        match customer.identity() {
            Identity::Unsaved => {
                conn.execute(
                    "INSERT INTO customers (first_name, last_name, phone, notes)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        customer.first_name,
                        customer.last_name,
                        customer.phone,
                        customer.notes,
                    ],
                )?;
                customer.mark_persisted(CustomerId(conn.last_insert_rowid()));
            }
            Identity::Persisted(id) => {
                conn.execute(
                    "UPDATE customers
                     SET first_name = ?1, last_name = ?2, phone = ?3, notes = ?4
                     WHERE id = ?5",
                    params![
                        customer.first_name,
                        customer.last_name,
                        customer.phone,
                        customer.notes,
                        id.0,
                    ],
                )?;
            }
        }
        Ok(())
    }

    /// Reservations belonging to `customer`. A customer that was never saved
    /// cannot own any.
    pub fn reservations(&self, customer: &Customer) -> Result<Vec<Reservation>> {
        match customer.id() {
            Some(id) => ReservationBook::new(self.store).list_for_customer(id),
            None => Ok(Vec::new()),
        }
    }
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer::from_row(
        CustomerId(row.get(0)?),
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

/// Escape LIKE metacharacters so the pattern matches the text literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
