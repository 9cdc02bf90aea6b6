use crate::error::DbError;

/// The internal schema and the API-facing schema, resolved once at start-up.
///
/// Schema names cannot be bound as statement parameters, so they are
/// interpolated into DDL and `search_path` statements. Both names are
/// therefore restricted to lowercase SQL identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaContext {
    schema: String,
    api_schema: String,
}

impl SchemaContext {
    pub fn new(schema: impl Into<String>, api_schema: impl Into<String>) -> Result<Self, DbError> {
        let schema = schema.into();
        let api_schema = api_schema.into();

        for name in [&schema, &api_schema] {
            if !is_identifier(name) {
                return Err(DbError::InvalidSchemaName(name.clone()));
            }
        }
        if schema == api_schema {
            return Err(DbError::InvalidSchemaName(api_schema));
        }

        Ok(Self { schema, api_schema })
    }

    /// The schema that owns the tables (`DB_SCHEMA`).
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The schema holding the compatibility views (`DB_SCHEMA_DAPI_V1`).
    pub fn api_schema(&self) -> &str {
        &self.api_schema
    }

    /// Session-level search path for API connections: views first, then tables.
    pub fn api_search_path(&self) -> String {
        format!("SET search_path = {}, {}, public", self.api_schema, self.schema)
    }

    /// Session-level search path for the migration connection, so sqlx keeps
    /// its `_sqlx_migrations` table inside the internal schema.
    pub fn internal_search_path(&self) -> String {
        format!("SET search_path = {}, public", self.schema)
    }

    /// Transaction-scoped search path used at the top of every migration.
    pub fn migration_search_path(&self) -> String {
        format!("SET LOCAL search_path = {}, public;", self.schema)
    }

    /// Drops and recreates the API view that mirrors `table`.
    pub fn compatibility_view(&self, table: &str) -> String {
        format!(
            "DROP VIEW IF EXISTS {api}.{table};\nCREATE VIEW {api}.{table} AS SELECT * FROM {schema}.{table};\n",
            api = self.api_schema,
            schema = self.schema,
        )
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_lowercase() => {}
        _ => return false,
    }
    // Postgres truncates identifiers past 63 bytes.
    name.len() <= 63 && chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
}
