use std::str::FromStr;

/// Identifier of the record being edited, as handed over by the host's router.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Result<Self, RouteIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RouteIdError::Empty);
        }
        match id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            Some(c) => Err(RouteIdError::InvalidChar(c)),
            None => Ok(Self(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RouteId {
    type Err = RouteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteIdError {
    Empty,
    InvalidChar(char),
}

impl std::fmt::Display for RouteIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteIdError::Empty => write!(f, "Route id is empty"),
            RouteIdError::InvalidChar(c) => write!(f, "Route id contains invalid character {c:?}"),
        }
    }
}

impl std::error::Error for RouteIdError {}

/// Views the editor can ask its host to navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ManagerList,
    ChangePassword(RouteId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ManagerList => "/user/allmanagers".to_string(),
            Route::ChangePassword(id) => format!("/user/change-password/{id}"),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_object_ids_and_slugs() {
        assert!(RouteId::new("65f1c2a9e4b0d3f2a1c9b8e7").is_ok());
        assert!("manager_01-a".parse::<RouteId>().is_ok());
    }

    #[test]
    fn rejects_ids_that_would_break_the_path() {
        assert_eq!(RouteId::new(""), Err(RouteIdError::Empty));
        assert_eq!(RouteId::new("a/b"), Err(RouteIdError::InvalidChar('/')));
        assert_eq!(RouteId::new("a?x=1"), Err(RouteIdError::InvalidChar('?')));
    }

    #[test]
    fn route_paths() {
        let id = RouteId::new("42").unwrap();
        assert_eq!(Route::ManagerList.path(), "/user/allmanagers");
        assert_eq!(Route::ChangePassword(id).path(), "/user/change-password/42");
    }
}
