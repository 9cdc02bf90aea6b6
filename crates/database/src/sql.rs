use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Postgres};
use std::fmt::Write;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    IntArray(Vec<i32>),
    Bool(bool),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(value)
    }
}

impl From<Vec<i32>> for SqlParam {
    fn from(value: Vec<i32>) -> Self {
        SqlParam::IntArray(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

/// Parameterized SQL: statement text plus the ordered values for `$1..$n`.
///
/// Built by the functions in [`crate::queries`] and executed by the
/// repository. Keeping the two apart lets the text and the bound values be
/// inspected without a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    sql: String,
    params: Vec<SqlParam>,
}

impl SqlStatement {
    /// A statement with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Prepares the statement for execution with every parameter bound.
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |query, param| match param {
                SqlParam::Text(value) => query.bind(value.as_str()),
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::IntArray(values) => query.bind(values.as_slice()),
                SqlParam::Bool(value) => query.bind(*value),
            })
    }

    /// Like [`SqlStatement::query`], mapping each row into `T`.
    pub fn query_as<T>(&self) -> QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        self.params
            .iter()
            .fold(sqlx::query_as::<_, T>(&self.sql), |query, param| match param {
                SqlParam::Text(value) => query.bind(value.as_str()),
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::IntArray(values) => query.bind(values.as_slice()),
                SqlParam::Bool(value) => query.bind(*value),
            })
    }
}

/// Incrementally assembles a [`SqlStatement`], numbering placeholders as
/// values are pushed. Mirrors the `push` / `push_bind` shape of
/// `sqlx::QueryBuilder`, but keeps the values inspectable.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    sql: String,
    params: Vec<SqlParam>,
}

impl SqlBuilder {
    pub fn new(init: impl Into<String>) -> Self {
        Self {
            sql: init.into(),
            params: Vec::new(),
        }
    }

    /// Appends raw SQL text. Never pass user input here.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends the next `$n` placeholder and records its value.
    pub fn push_bind(&mut self, value: impl Into<SqlParam>) -> &mut Self {
        self.params.push(value.into());
        // Writing to a String cannot fail.
        let _ = write!(self.sql, "${}", self.params.len());
        self
    }

    pub fn build(self) -> SqlStatement {
        SqlStatement {
            sql: self.sql,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_numbered_in_push_order() {
        let mut builder = SqlBuilder::new("SELECT * FROM project WHERE project_id = ");
        builder
            .push_bind(7)
            .push(" AND name ILIKE ")
            .push_bind("%fen%")
            .push(" AND is_project = ")
            .push_bind(false);
        let statement = builder.build();

        assert_eq!(
            statement.sql(),
            "SELECT * FROM project WHERE project_id = $1 AND name ILIKE $2 AND is_project = $3"
        );
        assert_eq!(
            statement.params(),
            [SqlParam::Int(7), SqlParam::Text("%fen%".to_string()), SqlParam::Bool(false)]
        );
    }

    #[test]
    fn test_static_statement_has_no_params() {
        let statement = SqlStatement::new("SELECT 1");
        assert_eq!(statement.sql(), "SELECT 1");
        assert!(statement.params().is_empty());
    }
}
