//! UI state types

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Username and room form. Shown until the room is joined.
    Join,
    /// Room header, message log, input line. Kept after a remote close so the
    /// log stays readable until the user leaves.
    Chat,
}

/// Focused field of the join form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Username field.
    Username,
    /// Room id field.
    Room,
}

impl Field {
    /// The other field.
    pub fn toggle(self) -> Self {
        match self {
            Self::Username => Self::Room,
            Self::Room => Self::Username,
        }
    }
}
