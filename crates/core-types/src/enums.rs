use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The character-valued system constants that the API is allowed to look up.
///
/// The set is closed: anything else is rejected before a query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemConstant {
    OrganizationNameFull,
    OrganizationUrl,
}

impl SystemConstant {
    pub const ALL: [SystemConstant; 2] = [Self::OrganizationNameFull, Self::OrganizationUrl];

    /// The literal constant name as stored in the `system_constant` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemConstant::OrganizationNameFull => "ORGANIZATION_NAME_FULL",
            SystemConstant::OrganizationUrl => "ORGANIZATION_URL",
        }
    }
}

impl fmt::Display for SystemConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known [`SystemConstant`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown system constant: {0}")]
pub struct UnknownConstant(pub String);

impl FromStr for SystemConstant {
    type Err = UnknownConstant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownConstant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_constants() {
        for constant in SystemConstant::ALL {
            assert_eq!(constant.as_str().parse::<SystemConstant>(), Ok(constant));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "organization_url".parse::<SystemConstant>().unwrap_err();
        assert_eq!(err, UnknownConstant("organization_url".to_string()));
    }

    #[test]
    fn test_serde_uses_literal_names() {
        let json = serde_json::to_string(&SystemConstant::OrganizationNameFull).unwrap();
        assert_eq!(json, "\"ORGANIZATION_NAME_FULL\"");
    }
}
