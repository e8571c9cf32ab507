use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::{CustomerDirectory, EmptyResults, ReservationBook, Store};
use crate::models::{Customer, CustomerId};

use super::forms::{CustomerField, CustomerForm, ReservationField, ReservationForm};
use super::helpers::{centered_rect, is_not_found, surface_error};
use super::screens::{CustomerListScreen, CustomerRow, CustomerScreen, ListView};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the customer summary block on the detail screen.
const DETAIL_HEIGHT: u16 = 7;

/// High-level navigation states.
enum Screen {
    Customers(CustomerListScreen),
    Detail(CustomerScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingCustomer(CustomerForm),
    EditingCustomer {
        customer: Customer,
        form: CustomerForm,
    },
    AddingReservation {
        customer_id: CustomerId,
        form: ReservationForm,
    },
    Searching(SearchState),
}

/// State for the name search prompt.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Store,
    empty_results: EmptyResults,
    top_limit: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app on top of `store` and load the full customer list.
    pub fn new(store: Store, empty_results: EmptyResults, top_limit: usize) -> Result<Self> {
        let mut app = Self {
            store,
            empty_results,
            top_limit,
            screen: Screen::Customers(CustomerListScreen::new(ListView::All, Vec::new())),
            mode: Mode::Normal,
            status: None,
        };
        app.show_list(ListView::All, None)?;
        Ok(app)
    }

    fn directory(&self) -> CustomerDirectory<'_> {
        CustomerDirectory::new(&self.store).with_empty_results(self.empty_results)
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingCustomer(form) => self.handle_add_customer(code, form),
            Mode::EditingCustomer { customer, form } => {
                self.handle_edit_customer(code, customer, form)
            }
            Mode::AddingReservation { customer_id, form } => {
                self.handle_add_reservation(code, customer_id, form)
            }
            Mode::Searching(state) => self.handle_search(code, state),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Customers(ref mut list) => {
                let mut open: Option<CustomerId> = None;
                let mut edit: Option<CustomerId> = None;
                let mut view: Option<ListView> = None;

                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        if list.view == ListView::All {
                            *exit = true;
                        } else {
                            view = Some(ListView::All);
                        }
                    }
                    KeyCode::Up => list.move_selection(-1),
                    KeyCode::Down => list.move_selection(1),
                    KeyCode::PageUp => list.move_selection(-5),
                    KeyCode::PageDown => list.move_selection(5),
                    KeyCode::Home => list.select_first(),
                    KeyCode::End => list.select_last(),
                    KeyCode::Enter => open = list.current_row().map(|row| row.id),
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        edit = list.current_row().map(|row| row.id);
                        if edit.is_none() {
                            self.set_status("No customer selected to edit.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char('+') => {
                        self.clear_status();
                        return Ok(Mode::AddingCustomer(CustomerForm::default()));
                    }
                    KeyCode::Char('/') | KeyCode::Char('f') => {
                        self.clear_status();
                        return Ok(Mode::Searching(SearchState {
                            query: String::new(),
                        }));
                    }
                    KeyCode::Char('t') | KeyCode::Char('T') => view = Some(ListView::Top),
                    KeyCode::Char('a') | KeyCode::Char('A') => view = Some(ListView::All),
                    _ => {}
                }

                if let Some(id) = open {
                    self.clear_status();
                    self.open_or_report(id);
                } else if let Some(id) = edit {
                    self.clear_status();
                    return Ok(self.begin_edit(id));
                } else if let Some(view) = view {
                    self.clear_status();
                    self.switch_list(view);
                }
                Ok(Mode::Normal)
            }
            Screen::Detail(ref mut detail) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        let origin = detail.origin.clone();
                        let focus = detail.customer.id();
                        self.clear_status();
                        if let Err(err) = self.show_list(origin, focus) {
                            tracing::warn!(error = %err, "could not restore previous list");
                            self.show_list(ListView::All, focus)?;
                        }
                    }
                    KeyCode::Up => detail.move_selection(-1),
                    KeyCode::Down => detail.move_selection(1),
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        let customer = detail.customer.clone();
                        self.clear_status();
                        return Ok(Mode::EditingCustomer {
                            form: CustomerForm::from_customer(&customer),
                            customer,
                        });
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('+') => {
                        if let Some(customer_id) = detail.customer.id() {
                            self.clear_status();
                            return Ok(Mode::AddingReservation {
                                customer_id,
                                form: ReservationForm::default(),
                            });
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_add_customer(&mut self, code: KeyCode, mut form: CustomerForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add customer cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_customer(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => self.form_error(&err, &mut form.error),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingCustomer(form)
    }

    fn handle_edit_customer(
        &mut self,
        code: KeyCode,
        mut customer: Customer,
        mut form: CustomerForm,
    ) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_existing_customer(&mut customer, &form) {
                Ok(()) => return Mode::Normal,
                Err(err) => self.form_error(&err, &mut form.error),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingCustomer { customer, form }
    }

    fn handle_add_reservation(
        &mut self,
        code: KeyCode,
        customer_id: CustomerId,
        mut form: ReservationForm,
    ) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Reservation cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_reservation(customer_id, &form) {
                Ok(()) => return Mode::Normal,
                Err(err) => self.form_error(&err, &mut form.error),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingReservation { customer_id, form }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Enter => {
                let query = state.query.trim().to_string();
                self.switch_list(ListView::Search(query));
                return Mode::Normal;
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => {}
        }
        Mode::Searching(state)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Customers(list) => self.draw_customer_list(frame, content_area, list),
            Screen::Detail(detail) => self.draw_customer_detail(frame, content_area, detail),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingCustomer(form) => self.draw_customer_form(frame, area, "Add Customer", form),
            Mode::EditingCustomer { form, .. } => {
                self.draw_customer_form(frame, area, "Edit Customer", form)
            }
            Mode::AddingReservation { form, .. } => self.draw_reservation_form(frame, area, form),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_customer_list(&self, frame: &mut Frame, area: Rect, list: &CustomerListScreen) {
        let block = Block::default()
            .title(list.view.title())
            .borders(Borders::ALL);

        if list.rows.is_empty() {
            let text = match list.view {
                ListView::All => "No customers yet. Press '+' to add one.",
                ListView::Top => "No top customers yet.",
                ListView::Search(_) => "Customer not found.",
            };
            let message = Paragraph::new(text).alignment(Alignment::Center).block(block);
            frame.render_widget(message, area);
            return;
        }

        let name_width = list
            .rows
            .iter()
            .map(|row| row.name.chars().count())
            .max()
            .unwrap_or(0);
        let items: Vec<ListItem> = list
            .rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<name_width$}", row.name)),
                    Span::raw("   "),
                    Span::styled(row.detail.clone(), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(list.selected));
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_customer_detail(&self, frame: &mut Frame, area: Rect, detail: &CustomerScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(DETAIL_HEIGHT), Constraint::Min(0)])
            .split(area);

        let customer = &detail.customer;
        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let info = vec![
            Line::from(vec![
                Span::styled("Phone: ", label_style),
                Span::raw(customer.phone.clone().unwrap_or_else(|| "-".to_string())),
            ]),
            Line::from(vec![
                Span::styled("Notes: ", label_style),
                Span::raw(customer.notes.clone().unwrap_or_else(|| "-".to_string())),
            ]),
        ];
        let summary = Paragraph::new(info)
            .block(
                Block::default()
                    .title(customer.display_name())
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(summary, chunks[0]);

        let block = Block::default().title("Reservations").borders(Borders::ALL);
        if detail.reservations.is_empty() {
            let message = Paragraph::new("No reservations yet. Press 'r' to book one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = detail
            .reservations
            .iter()
            .map(|reservation| {
                let mut spans = vec![
                    Span::styled(reservation.formatted_start_at(), label_style),
                    Span::raw(format!("  party of {}", reservation.num_guests)),
                ];
                if let Some(notes) = &reservation.notes {
                    spans.push(Span::styled(
                        format!("  {notes}"),
                        Style::default().fg(Color::Gray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(detail.selected));
        frame.render_stateful_widget(widget, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search by name");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => &[("[Enter]", "Search"), ("[Esc]", "Cancel")],
            (_, Mode::AddingCustomer(_) | Mode::EditingCustomer { .. })
            | (_, Mode::AddingReservation { .. }) => &[
                ("[Tab]", "Next Field"),
                ("[Enter]", "Save"),
                ("[Esc]", "Cancel"),
            ],
            (Screen::Detail(_), _) => &[
                ("[↑↓]", "Reservations"),
                ("[e]", "Edit"),
                ("[r]", "Add Reservation"),
                ("[Esc]", "Back"),
                ("[q]", "Quit"),
            ],
            (Screen::Customers(_), _) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Open"),
                ("[+]", "Add"),
                ("[e]", "Edit"),
                ("[/]", "Search"),
                ("[t]", "Top"),
                ("[a]", "All"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (idx, (key, action)) in keys.iter().enumerate() {
            spans.push(Span::styled(key.to_string(), key_style));
            if idx + 1 == keys.len() {
                spans.push(Span::raw(format!(" {action}")));
            } else {
                spans.push(Span::raw(format!(" {action}   ")));
            }
        }
        Line::from(spans)
    }

    fn draw_customer_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &CustomerForm) {
        let mut lines: Vec<Line> = CustomerField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        self.draw_form(frame, area, title, lines, form.error.as_deref(), form.cursor());
    }

    fn draw_reservation_form(&self, frame: &mut Frame, area: Rect, form: &ReservationForm) {
        let mut lines: Vec<Line> = ReservationField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        self.draw_form(
            frame,
            area,
            "Add Reservation",
            lines,
            form.error.as_deref(),
            form.cursor(),
        );
    }

    /// Shared popup for both forms: field lines, then the error or the key
    /// hint, then the cursor on the active field.
    fn draw_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        error: Option<&str>,
        cursor: (u16, u16),
    ) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if let Some(error) = error {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (column, row) = cursor;
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Report a failed save both inside the form and in the footer.
    fn form_error(&mut self, err: &anyhow::Error, slot: &mut Option<String>) {
        let message = surface_error(err);
        tracing::warn!(error = %format!("{err:#}"), "form submission failed");
        *slot = Some(message.clone());
        self.set_status(message, StatusKind::Error);
    }

    fn save_new_customer(&mut self, form: &CustomerForm) -> Result<()> {
        let mut customer = form.to_customer()?;
        self.directory()
            .save(&mut customer)
            .context("failed to add customer")?;
        let id = customer.id().context("customer was not assigned an id")?;
        tracing::info!(customer_id = %id, "added customer");

        self.open_customer(customer, ListView::All)?;
        self.set_status("Customer added.", StatusKind::Info);
        Ok(())
    }

    fn save_existing_customer(&mut self, customer: &mut Customer, form: &CustomerForm) -> Result<()> {
        form.apply_to(customer)?;
        self.directory()
            .save(customer)
            .context("failed to update customer")?;
        tracing::info!(customer_id = ?customer.id(), "updated customer");

        let origin = self.current_origin();
        self.open_customer(customer.clone(), origin)?;
        self.set_status("Customer updated.", StatusKind::Info);
        Ok(())
    }

    fn save_reservation(&mut self, customer_id: CustomerId, form: &ReservationForm) -> Result<()> {
        let mut reservation = form.parse(customer_id)?;
        ReservationBook::new(&self.store)
            .save(&mut reservation)
            .context("failed to add reservation")?;
        tracing::info!(
            customer_id = %customer_id,
            reservation_id = ?reservation.id(),
            "added reservation"
        );

        let origin = self.current_origin();
        let customer = self.directory().get_by_id(customer_id)?;
        self.open_customer(customer, origin)?;
        self.set_status("Reservation added.", StatusKind::Info);
        Ok(())
    }

    /// The list the current screen was reached from.
    fn current_origin(&self) -> ListView {
        match &self.screen {
            Screen::Customers(list) => list.view.clone(),
            Screen::Detail(detail) => detail.origin.clone(),
        }
    }

    fn open_customer(&mut self, customer: Customer, origin: ListView) -> Result<()> {
        let reservations = self
            .directory()
            .reservations(&customer)
            .context("failed to load reservations")?;
        self.screen = Screen::Detail(CustomerScreen::new(customer, reservations, origin));
        Ok(())
    }

    /// Open the detail view for `id`, reporting lookup problems in the footer.
    fn open_or_report(&mut self, id: CustomerId) {
        let origin = self.current_origin();
        let lookup = self.directory().get_by_id(id);
        let result = lookup
            .map_err(anyhow::Error::from)
            .and_then(|customer| self.open_customer(customer, origin));
        if let Err(err) = result {
            tracing::warn!(customer_id = %id, error = %err, "could not open customer");
            self.set_status(surface_error(&err), StatusKind::Error);
        }
    }

    fn begin_edit(&mut self, id: CustomerId) -> Mode {
        let lookup = self.directory().get_by_id(id);
        match lookup {
            Ok(customer) => Mode::EditingCustomer {
                form: CustomerForm::from_customer(&customer),
                customer,
            },
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                Mode::Normal
            }
        }
    }

    /// Load `view` and show it, or explain in the footer why it is empty.
    fn switch_list(&mut self, view: ListView) {
        let message = match &view {
            ListView::Top => "No top customers yet",
            ListView::Search(_) | ListView::All => "Customer not found.",
        };
        if let Err(err) = self.show_list(view, None) {
            if is_not_found(&err) {
                self.set_status(message, StatusKind::Error);
            } else {
                tracing::error!(error = %format!("{err:#}"), "failed to load customers");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    /// Run the query behind `view` and replace the current screen with it.
    fn show_list(&mut self, view: ListView, focus: Option<CustomerId>) -> Result<()> {
        let directory = self.directory();
        let rows: Vec<CustomerRow> = match &view {
            ListView::All => directory
                .list()
                .context("failed to load customers")?
                .iter()
                .filter_map(CustomerRow::from_customer)
                .collect(),
            ListView::Top => directory
                .top_ranked(self.top_limit)
                .context("failed to rank customers")?
                .iter()
                .map(CustomerRow::from_ranked)
                .collect(),
            ListView::Search(query) => directory
                .search(query)
                .context("failed to search customers")?
                .iter()
                .filter_map(CustomerRow::from_customer)
                .collect(),
        };

        let mut screen = CustomerListScreen::new(view, rows);
        if let Some(id) = focus {
            screen.focus(id);
        }
        self.screen = Screen::Customers(screen);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Reservation;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let directory = CustomerDirectory::new(&store);
        for (first, last) in [("John", "Smith"), ("Jane", "Doe")] {
            directory.save(&mut Customer::new(first, last)).unwrap();
        }
        store
    }

    fn type_keys(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn list_names(app: &App) -> Vec<String> {
        match &app.screen {
            Screen::Customers(list) => list.rows.iter().map(|row| row.name.clone()).collect(),
            Screen::Detail(_) => panic!("expected a customer list"),
        }
    }

    #[test]
    fn starts_on_sorted_customer_list() {
        let app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        assert_eq!(list_names(&app), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn search_prompt_filters_the_list() {
        let mut app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        app.handle_key(KeyCode::Char('/')).unwrap();
        type_keys(&mut app, "smi");
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(list_names(&app), vec!["John Smith"]);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn failed_search_keeps_list_and_reports() {
        let mut app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        app.handle_key(KeyCode::Char('/')).unwrap();
        type_keys(&mut app, "zzz");
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(list_names(&app).len(), 2);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.text, "Customer not found.");
    }

    #[test]
    fn top_view_without_reservations_reports() {
        let mut app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        app.handle_key(KeyCode::Char('t')).unwrap();
        assert_eq!(app.status.as_ref().unwrap().text, "No top customers yet");
    }

    #[test]
    fn adding_a_customer_opens_their_detail() {
        let mut app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        type_keys(&mut app, "Ada");
        app.handle_key(KeyCode::Tab).unwrap();
        type_keys(&mut app, "Lovelace");
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.customer.full_name().as_deref(), Some("Ada Lovelace"));
                assert!(detail.customer.id().is_some());
            }
            Screen::Customers(_) => panic!("expected the detail view"),
        }

        app.handle_key(KeyCode::Esc).unwrap();
        assert_eq!(list_names(&app).len(), 3);
    }

    #[test]
    fn booking_from_detail_lists_reservation() {
        let mut app = App::new(seeded_store(), EmptyResults::Error, 10).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Char('r')).unwrap();
        type_keys(&mut app, "2026-01-31 19:30");
        app.handle_key(KeyCode::Tab).unwrap();
        type_keys(&mut app, "3");
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.reservations.len(), 1);
                let expected = NaiveDate::from_ymd_opt(2026, 1, 31)
                    .unwrap()
                    .and_hms_opt(19, 30, 0)
                    .unwrap();
                let reservation: &Reservation = &detail.reservations[0];
                assert_eq!(reservation.start_at, expected);
                assert_eq!(reservation.num_guests, 3);
            }
            Screen::Customers(_) => panic!("expected the detail view"),
        }
    }
}
