use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Customer, CustomerId, Reservation};

use super::helpers::optional_text;

/// Input format for reservation start times.
pub(crate) const START_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fields of the customer form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum CustomerField {
    #[default]
    FirstName,
    LastName,
    Phone,
    Notes,
}

impl CustomerField {
    pub(crate) const ALL: [CustomerField; 4] = [
        CustomerField::FirstName,
        CustomerField::LastName,
        CustomerField::Phone,
        CustomerField::Notes,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            CustomerField::FirstName => "First name",
            CustomerField::LastName => "Last name",
            CustomerField::Phone => "Phone",
            CustomerField::Notes => "Notes",
        }
    }

    fn required(self) -> bool {
        matches!(self, CustomerField::FirstName | CustomerField::LastName)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Form state for adding or editing a customer.
#[derive(Default, Clone)]
pub(crate) struct CustomerForm {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) phone: String,
    pub(crate) notes: String,
    pub(crate) active: CustomerField,
    pub(crate) error: Option<String>,
}

impl CustomerForm {
    /// Populate the form from an existing customer when editing.
    pub(crate) fn from_customer(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            notes: customer.notes.clone().unwrap_or_default(),
            active: CustomerField::FirstName,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % CustomerField::ALL.len();
        self.active = CustomerField::ALL[idx];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = CustomerField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = CustomerField::ALL[idx];
    }

    fn value(&self, field: CustomerField) -> &String {
        match field {
            CustomerField::FirstName => &self.first_name,
            CustomerField::LastName => &self.last_name,
            CustomerField::Phone => &self.phone,
            CustomerField::Notes => &self.notes,
        }
    }

    fn value_mut(&mut self, field: CustomerField) -> &mut String {
        match field {
            CustomerField::FirstName => &mut self.first_name,
            CustomerField::LastName => &mut self.last_name,
            CustomerField::Phone => &mut self.phone,
            CustomerField::Notes => &mut self.notes,
        }
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Build a brand new, unsaved customer from the inputs.
    pub(crate) fn to_customer(&self) -> Result<Customer> {
        let (first, last) = self.required_names()?;
        let mut customer = Customer::new(first, last);
        customer.phone = optional_text(&self.phone);
        customer.notes = optional_text(&self.notes);
        Ok(customer)
    }

    /// Overwrite every editable field of `customer` with the inputs.
    pub(crate) fn apply_to(&self, customer: &mut Customer) -> Result<()> {
        let (first, last) = self.required_names()?;
        customer.first_name = Some(first);
        customer.last_name = Some(last);
        customer.phone = optional_text(&self.phone);
        customer.notes = optional_text(&self.notes);
        Ok(())
    }

    fn required_names(&self) -> Result<(String, String)> {
        let first = self.first_name.trim();
        if first.is_empty() {
            return Err(anyhow!("First name is required."));
        }
        let last = self.last_name.trim();
        if last.is_empty() {
            return Err(anyhow!("Last name is required."));
        }
        Ok((first.to_string(), last.to_string()))
    }

    pub(crate) fn build_line(&self, field: CustomerField) -> Line<'static> {
        let placeholder = if field.required() {
            "<required>"
        } else {
            "<optional>"
        };
        field_line(field.label(), self.value(field), placeholder, self.active == field)
    }

    /// Cursor column offset (label prefix plus typed text) and row of the
    /// active field.
    pub(crate) fn cursor(&self) -> (u16, u16) {
        let field = self.active;
        let prefix = format!("{}: ", field.label()).len();
        let column = prefix + self.value(field).chars().count();
        (column as u16, field.index() as u16)
    }
}

/// Fields of the reservation form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ReservationField {
    #[default]
    StartAt,
    NumGuests,
    Notes,
}

impl ReservationField {
    pub(crate) const ALL: [ReservationField; 3] = [
        ReservationField::StartAt,
        ReservationField::NumGuests,
        ReservationField::Notes,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ReservationField::StartAt => "Start",
            ReservationField::NumGuests => "Guests",
            ReservationField::Notes => "Notes",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            ReservationField::StartAt => "<YYYY-MM-DD HH:MM>",
            ReservationField::NumGuests => "<required>",
            ReservationField::Notes => "<optional>",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Form state for booking a reservation from the customer detail view.
#[derive(Default, Clone)]
pub(crate) struct ReservationForm {
    pub(crate) start_at: String,
    pub(crate) num_guests: String,
    pub(crate) notes: String,
    pub(crate) active: ReservationField,
    pub(crate) error: Option<String>,
}

impl ReservationForm {
    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % ReservationField::ALL.len();
        self.active = ReservationField::ALL[idx];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = ReservationField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = ReservationField::ALL[idx];
    }

    fn value(&self, field: ReservationField) -> &String {
        match field {
            ReservationField::StartAt => &self.start_at,
            ReservationField::NumGuests => &self.num_guests,
            ReservationField::Notes => &self.notes,
        }
    }

    /// Append a character to the active field, keeping the guest count numeric.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            ReservationField::NumGuests => {
                if ch.is_ascii_digit() {
                    self.num_guests.push(ch);
                    true
                } else {
                    false
                }
            }
            ReservationField::StartAt => {
                if !ch.is_control() {
                    self.start_at.push(ch);
                    true
                } else {
                    false
                }
            }
            ReservationField::Notes => {
                if !ch.is_control() {
                    self.notes.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ReservationField::StartAt => {
                self.start_at.pop();
            }
            ReservationField::NumGuests => {
                self.num_guests.pop();
            }
            ReservationField::Notes => {
                self.notes.pop();
            }
        }
    }

    /// Validate the inputs and build an unsaved reservation for `customer_id`.
    pub(crate) fn parse(&self, customer_id: CustomerId) -> Result<Reservation> {
        let start_raw = self.start_at.trim();
        if start_raw.is_empty() {
            return Err(anyhow!("Start time is required."));
        }
        let start_at = NaiveDateTime::parse_from_str(start_raw, START_AT_FORMAT)
            .context("Start time must look like 2026-01-31 19:30.")?;

        let guests_raw = self.num_guests.trim();
        if guests_raw.is_empty() {
            return Err(anyhow!("Guest count is required."));
        }
        let num_guests = guests_raw
            .parse::<u32>()
            .context("Guest count must be a whole number.")?;

        let reservation =
            Reservation::new(customer_id, start_at, num_guests, optional_text(&self.notes))?;
        Ok(reservation)
    }

    pub(crate) fn build_line(&self, field: ReservationField) -> Line<'static> {
        field_line(
            field.label(),
            self.value(field),
            field.placeholder(),
            self.active == field,
        )
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        let field = self.active;
        let prefix = format!("{}: ", field.label()).len();
        let column = prefix + self.value(field).chars().count();
        (column as u16, field.index() as u16)
    }
}

/// Render `Label: value`, dimming the placeholder and highlighting the field
/// that has focus.
fn field_line(label: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReservationError;

    fn type_text(form: &mut CustomerForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn customer_form_requires_both_names() {
        let mut form = CustomerForm::default();
        type_text(&mut form, "Ada");
        let err = form.to_customer().unwrap_err();
        assert_eq!(err.to_string(), "Last name is required.");

        form.next_field();
        type_text(&mut form, " Lovelace ");
        let customer = form.to_customer().unwrap();
        assert_eq!(customer.full_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn customer_form_round_trips_existing_customer() {
        let mut customer = Customer::new("Ada", "Lovelace").with_notes("regular");
        let mut form = CustomerForm::from_customer(&customer);
        form.active = CustomerField::Phone;
        type_text(&mut form, "555-0100");
        form.apply_to(&mut customer).unwrap();

        assert_eq!(customer.phone.as_deref(), Some("555-0100"));
        assert_eq!(customer.notes.as_deref(), Some("regular"));
    }

    #[test]
    fn field_focus_wraps_around() {
        let mut form = CustomerForm::default();
        form.previous_field();
        assert_eq!(form.active, CustomerField::Notes);
        form.next_field();
        assert_eq!(form.active, CustomerField::FirstName);
    }

    #[test]
    fn cursor_follows_typed_text() {
        let mut form = CustomerForm::default();
        form.next_field();
        type_text(&mut form, "Lee");
        assert_eq!(form.cursor(), ("Last name: ".len() as u16 + 3, 1));
    }

    #[test]
    fn reservation_form_parses_inputs() {
        let form = ReservationForm {
            start_at: "2026-01-31 19:30".into(),
            num_guests: "4".into(),
            notes: "  ".into(),
            ..ReservationForm::default()
        };
        let reservation = form.parse(CustomerId(3)).unwrap();
        assert_eq!(reservation.customer_id, CustomerId(3));
        assert_eq!(reservation.num_guests, 4);
        assert_eq!(reservation.notes, None);
        assert_eq!(reservation.formatted_start_at(), "January 31, 2026, 7:30 PM");
    }

    #[test]
    fn reservation_form_rejects_bad_input() {
        let mut form = ReservationForm {
            start_at: "tomorrow".into(),
            num_guests: "2".into(),
            ..ReservationForm::default()
        };
        assert!(form.parse(CustomerId(1)).is_err());

        form.start_at = "2026-01-31 19:30".into();
        form.num_guests = "0".into();
        let err = form.parse(CustomerId(1)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReservationError>(),
            Some(&ReservationError::NoGuests)
        );
    }

    #[test]
    fn guest_count_only_accepts_digits() {
        let mut form = ReservationForm::default();
        form.next_field();
        assert!(!form.push_char('x'));
        assert!(form.push_char('7'));
        assert_eq!(form.num_guests, "7");
    }
}
