//! Fixed copy shown to the user. Category values live in `category.rs`.

pub const INITIAL_GREETING: &str = "Hello! I'm here to help you file a complaint. Please select the type of issue you want to report by clicking one of the buttons below:";

pub const RESET_GREETING: &str = "Hello! I'm here to help you file a new complaint. Please select the type of issue you want to report by clicking one of the buttons below:";

/// Appended when a category pick or free-text message could not be delivered.
pub const APOLOGY_RETRY_OR_RESTART: &str =
    "Sorry, I encountered an error. Please try again or start a new complaint.";

/// Appended when a structured field could not be delivered.
pub const APOLOGY_RETRY: &str = "Sorry, I encountered an error. Please try again.";
