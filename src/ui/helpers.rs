use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::DirectoryError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// True when the directory reported an empty or missing result rather than a
/// store failure.
pub(crate) fn is_not_found(err: &Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<DirectoryError>()
            .is_some_and(DirectoryError::is_not_found)
    })
}

/// Trimmed input, or `None` when the user left the field blank.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;
    use crate::error::NotFound;
    use crate::models::CustomerId;

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow::anyhow!("disk full"))
            .context("failed to save customer")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn not_found_is_detected_through_context() {
        let err = Err::<(), _>(DirectoryError::from(NotFound::Customer(CustomerId(5))))
            .context("failed to open customer")
            .unwrap_err();
        assert!(is_not_found(&err));
        assert!(!is_not_found(&anyhow::anyhow!("boom")));
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" hi "), Some("hi".to_string()));
    }
}
