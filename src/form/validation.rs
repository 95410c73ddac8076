use crate::models::{Field, ManagerRecord};
use regex::Regex;
use std::sync::LazyLock;

static CONTACT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("contact number pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));

/// First rule a record breaks, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    ContactNumber,
    Email,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "All fields are required.",
            ValidationError::ContactNumber => "Contact number must be 10 digits.",
            ValidationError::Email => "Invalid email address.",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

pub fn validate(record: &ManagerRecord) -> Result<(), ValidationError> {
    if Field::ALL.iter().any(|x| record.get(*x).is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    if !CONTACT_NUMBER.is_match(&record.contact_number) {
        return Err(ValidationError::ContactNumber);
    }
    if !EMAIL.is_match(&record.email) {
        return Err(ValidationError::Email);
    }
    Ok(())
}

pub fn is_valid(record: &ManagerRecord) -> bool {
    validate(record).is_ok()
}
