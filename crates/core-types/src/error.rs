use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The closed set of failure kinds surfaced at the API boundary.
///
/// `BuildSql` is a construction-time failure (the request carried parameters a
/// statement could not be built from); `ExecuteSql` means the database
/// rejected or failed the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorType {
    General,
    Unknown,
    ExecuteSql,
    BuildSql,
}

impl ApiErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorType::General => "GENERAL",
            ApiErrorType::Unknown => "UNKNOWN",
            ApiErrorType::ExecuteSql => "EXECUTE_SQL",
            ApiErrorType::BuildSql => "BUILD_SQL",
        }
    }
}

impl fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified API failure. The kind is fixed by the constructor used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorType,
    message: String,
    errors: Vec<String>,
}

impl ApiError {
    fn new(kind: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::new(ApiErrorType::General, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorType::Unknown, message)
    }

    pub fn execute_sql(message: impl Into<String>) -> Self {
        Self::new(ApiErrorType::ExecuteSql, message)
    }

    pub fn build_sql(message: impl Into<String>) -> Self {
        Self::new(ApiErrorType::BuildSql, message)
    }

    /// Attaches an underlying cause, kept as text for the response body.
    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        self.errors.push(error.to_string());
        self
    }

    /// The tag of this error's kind, e.g. `"EXECUTE_SQL"`.
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn kind(&self) -> ApiErrorType {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::execute_sql("Failed to execute SQL statement").with_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_fixed_name() {
        let cases = [
            (ApiError::general("a"), "GENERAL"),
            (ApiError::unknown("b"), "UNKNOWN"),
            (ApiError::execute_sql("c"), "EXECUTE_SQL"),
            (ApiError::build_sql("d"), "BUILD_SQL"),
        ];
        for (err, name) in cases {
            assert_eq!(err.name(), name);
            assert_eq!(err.kind().as_str(), name);
        }
    }

    #[test]
    fn test_message_is_preserved_verbatim() {
        let message = "  Failed to build SQL get statement: id=<0>  ";
        let err = ApiError::build_sql(message);
        assert_eq!(err.message(), message);
        assert_eq!(err.to_string(), message);
        assert!(err.errors().is_empty());
    }

    #[test]
    fn test_with_error_collects_causes() {
        let err = ApiError::general("outer").with_error("inner").with_error(42);
        assert_eq!(err.errors(), ["inner".to_string(), "42".to_string()]);
        assert_eq!(err.message(), "outer");
    }

    #[test]
    fn test_sqlx_errors_are_execution_failures() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ApiErrorType::ExecuteSql);
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_kind_serializes_as_tag() {
        let json = serde_json::to_value(ApiErrorType::BuildSql).unwrap();
        assert_eq!(json, serde_json::json!("BUILD_SQL"));
    }
}
