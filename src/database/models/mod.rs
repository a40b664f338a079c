pub mod calendar;
pub mod event;
pub mod project;
pub mod task;
pub mod user;

pub use calendar::{Calendar, CalendarInput};
pub use event::{Event, EventQuery, EventUpdate, NewEvent};
pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput, TaskLabel, TaskPriority, TaskRow, TaskStatus, TaskStatusUpdate};
pub use user::{LoginRequest, NewUser, RegisterRequest, User, UserProfile};

use validator::ValidationError;

/// `#RRGGBB` hex colour.
pub(crate) fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        return Ok(());
    }
    let mut err = ValidationError::new("hex_color");
    err.message = Some("must be a #RRGGBB hex code".into());
    Err(err)
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    let mut err = ValidationError::new("blank");
    err.message = Some("must not be blank".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert!(validate_hex_color("#A1b2C3").is_ok());
        assert!(validate_hex_color("A1b2C3").is_err());
        assert!(validate_hex_color("#12345").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }
}
