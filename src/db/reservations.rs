use rusqlite::{params, Row};

use crate::error::Result;
use crate::models::{CustomerId, Identity, Reservation, ReservationId};

use super::Store;

/// Data access for the `reservations` table.
pub struct ReservationBook<'s> {
    store: &'s Store,
}

impl<'s> ReservationBook<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Every reservation held by `customer_id`, earliest first. An empty list
    /// is a normal answer here.
    pub fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Reservation>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT id, customer_id, start_at, num_guests, notes
             FROM reservations
             WHERE customer_id = ?1
             ORDER BY start_at, id",
        )?;

        let reservations = stmt
            .query_map([customer_id.0], reservation_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reservations)
    }

    /// Insert an unsaved reservation (assigning its new id) or overwrite every
    /// field of a persisted one.
    pub fn save(&self, reservation: &mut Reservation) -> Result<()> {
        let conn = self.store.conn();
        match reservation.identity() {
            Identity::Unsaved => {
                conn.execute(
                    "INSERT INTO reservations (customer_id, start_at, num_guests, notes)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        reservation.customer_id.0,
                        reservation.start_at,
                        reservation.num_guests,
                        reservation.notes,
                    ],
                )?;
                reservation.mark_persisted(ReservationId(conn.last_insert_rowid()));
            }
            Identity::Persisted(id) => {
                conn.execute(
                    "UPDATE reservations
                     SET customer_id = ?1, start_at = ?2, num_guests = ?3, notes = ?4
                     WHERE id = ?5",
                    params![
                        reservation.customer_id.0,
                        reservation.start_at,
                        reservation.num_guests,
                        reservation.notes,
                        id.0,
                    ],
                )?;
            }
        }
        Ok(())
    }
}

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation::from_row(
        ReservationId(row.get(0)?),
        CustomerId(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}
