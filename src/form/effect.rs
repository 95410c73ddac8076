use crate::models::Route;

pub const UPDATE_SUCCEEDED: &str = "Manager details updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update manager details.";

/// Transient message for the user. This is the only notification channel;
/// hosts decide how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(e) | Notice::Error(e) => e,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(e) => write!(f, "[ok] {e}"),
            Notice::Error(e) => write!(f, "[error] {e}"),
        }
    }
}

/// Side effect the form asks its host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    Navigate(Route),
}
