use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagerRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contact_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(with = "manager_type_field")]
    pub manager_type: Option<ManagerType>,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
}

impl ManagerRecord {
    /// Returns a copy of the record with `field` replaced by `value`.
    ///
    /// An empty value for [`Field::ManagerType`] clears the selection.
    pub fn with_field(&self, field: Field, value: &str) -> Result<Self, FieldError> {
        let mut new = self.clone();
        match field {
            Field::FullName => new.full_name = value.to_string(),
            Field::ContactNumber => new.contact_number = value.to_string(),
            Field::Username => new.username = value.to_string(),
            Field::Email => new.email = value.to_string(),
            Field::ManagerType if value.is_empty() => new.manager_type = None,
            Field::ManagerType => new.manager_type = Some(value.parse()?),
        }
        Ok(new)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::ContactNumber => &self.contact_number,
            Field::Username => &self.username,
            Field::ManagerType => self.manager_type.map(|x| x.as_str()).unwrap_or_default(),
            Field::Email => &self.email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ManagerType {
    Inventory,
    Supplier,
    Transport,
    Feedback,
    Finance,
    Employee,
    Order,
}

impl ManagerType {
    pub const ALL: [ManagerType; 7] = [
        ManagerType::Inventory,
        ManagerType::Supplier,
        ManagerType::Transport,
        ManagerType::Feedback,
        ManagerType::Finance,
        ManagerType::Employee,
        ManagerType::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::Supplier => "Supplier",
            Self::Transport => "Transport",
            Self::Feedback => "Feedback",
            Self::Finance => "Finance",
            Self::Employee => "Employee",
            Self::Order => "Order",
        }
    }
}

impl std::fmt::Display for ManagerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ManagerType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| FieldError::UnknownManagerType(s.to_string()))
    }
}

/// The editable inputs of the form, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    ContactNumber,
    Username,
    ManagerType,
    Email,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FullName,
        Field::ContactNumber,
        Field::Username,
        Field::ManagerType,
        Field::Email,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::ContactNumber => "contactNumber",
            Self::Username => "username",
            Self::ManagerType => "managerType",
            Self::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::ContactNumber => "Contact Number",
            Self::Username => "Username",
            Self::ManagerType => "Manager Type",
            Self::Email => "Email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    UnknownField(String),
    UnknownManagerType(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::UnknownField(e) => write!(f, "Unknown field: {e}"),
            FieldError::UnknownManagerType(e) => write!(f, "Unknown manager type: {e}"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Reads `null` as an empty field; validation reports it before any submit.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod manager_type_field {
    use super::*;

    pub fn serialize<S>(value: &Option<ManagerType>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map(|x| x.as_str()).unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ManagerType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = null_as_empty(deserializer)?;
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
