//! Forward-only schema migrations.
//!
//! Each step renders SQL for a [`SchemaContext`]: it sets the search path for
//! the enclosing transaction, applies its change to the internal schema, and
//! recreates the affected compatibility views in the API schema. `down`
//! scripts are intentionally empty. A bad step is corrected by a later one.
//!
//! The rendered steps run through `sqlx::migrate::Migrator`, which owns the
//! `_sqlx_migrations` history table, the advisory lock and checksum checks.

mod m20220101000000_initial_schema;
mod m20220301120000_treatment_unit_comments;
mod m20220412090000_funding_source_names;
mod m20220520153000_project_publish_date;
mod m20220607100000_organization_constants;
mod m20220715093000_treatment_unit_geojson_array;

use crate::error::DbError;
use crate::schema::SchemaContext;
use futures::future::BoxFuture;
use sqlx::error::BoxDynError;
use sqlx::migrate::{Migrate, MigrationSource, MigrationType, Migrator};
use sqlx::{Connection, PgConnection, PgPool};
use std::borrow::Cow;
use std::collections::HashSet;

/// A single migration step, identified by its timestamp version.
#[derive(Debug)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    up: fn(&SchemaContext) -> String,
}

impl Migration {
    pub fn up(&self, ctx: &SchemaContext) -> String {
        (self.up)(ctx)
    }

    /// Always empty; rollbacks are done with a new forward migration.
    pub fn down(&self, _ctx: &SchemaContext) -> String {
        String::new()
    }

    /// The step rendered for `ctx` as an sqlx up/down pair.
    fn to_sqlx(&self, ctx: &SchemaContext) -> [sqlx::migrate::Migration; 2] {
        let step = |migration_type: MigrationType, sql: String| {
            sqlx::migrate::Migration::new(
                self.version,
                Cow::Borrowed(self.description),
                migration_type,
                Cow::Owned(sql),
                false,
            )
        };
        [
            step(MigrationType::ReversibleUp, self.up(ctx)),
            step(MigrationType::ReversibleDown, self.down(ctx)),
        ]
    }
}

static MIGRATIONS: [Migration; 6] = [
    Migration {
        version: 20220101000000,
        description: "initial schema",
        up: m20220101000000_initial_schema::up,
    },
    Migration {
        version: 20220301120000,
        description: "treatment unit comments",
        up: m20220301120000_treatment_unit_comments::up,
    },
    Migration {
        version: 20220412090000,
        description: "funding source names",
        up: m20220412090000_funding_source_names::up,
    },
    Migration {
        version: 20220520153000,
        description: "project publish date",
        up: m20220520153000_project_publish_date::up,
    },
    Migration {
        version: 20220607100000,
        description: "organization constants",
        up: m20220607100000_organization_constants::up,
    },
    Migration {
        version: 20220715093000,
        description: "treatment unit geojson array",
        up: m20220715093000_treatment_unit_geojson_array::up,
    },
];

/// Every known migration, in the order they must be applied.
pub fn all() -> &'static [Migration] {
    &MIGRATIONS
}

/// Feeds the steps, rendered for one pair of schemas, to an sqlx [`Migrator`].
#[derive(Debug, Clone)]
pub struct SchemaMigrations {
    ctx: SchemaContext,
}

impl SchemaMigrations {
    pub fn new(ctx: &SchemaContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl<'s> MigrationSource<'s> for SchemaMigrations {
    fn resolve(self) -> BoxFuture<'s, Result<Vec<sqlx::migrate::Migration>, BoxDynError>> {
        Box::pin(async move {
            Ok(all()
                .iter()
                .flat_map(|migration| migration.to_sqlx(&self.ctx))
                .collect())
        })
    }
}

pub async fn migrator(ctx: &SchemaContext) -> Result<Migrator, DbError> {
    Ok(Migrator::new(SchemaMigrations::new(ctx)).await?)
}

/// Applies every pending migration in version order.
///
/// Returns the versions that were applied by this call; an up-to-date
/// database yields an empty list.
pub async fn run_migrations(pool: &PgPool, ctx: &SchemaContext) -> Result<Vec<i64>, DbError> {
    let migrator = migrator(ctx).await?;
    let mut conn = migration_connection(pool, ctx).await?;

    let before = applied_on(&mut conn).await?;
    migrator.run(&mut conn).await?;
    let after = applied_on(&mut conn).await?;
    conn.close().await?;

    let applied: Vec<i64> = all()
        .iter()
        .map(|migration| migration.version)
        .filter(|version| after.contains(version) && !before.contains(version))
        .collect();

    if applied.is_empty() {
        tracing::info!(schema = ctx.schema(), "Database schema is up to date.");
    } else {
        tracing::info!(schema = ctx.schema(), ?applied, "Applied migrations.");
    }
    Ok(applied)
}

/// Versions recorded by sqlx in the internal schema, ascending.
pub async fn applied_versions(pool: &PgPool, ctx: &SchemaContext) -> Result<Vec<i64>, DbError> {
    let mut conn = migration_connection(pool, ctx).await?;
    let applied = applied_on(&mut conn).await?;
    conn.close().await?;

    let mut versions: Vec<i64> = applied.into_iter().collect();
    versions.sort_unstable();
    Ok(versions)
}

/// Migrations not yet applied, in apply order.
pub async fn pending_migrations(
    pool: &PgPool,
    ctx: &SchemaContext,
) -> Result<Vec<&'static Migration>, DbError> {
    let applied: HashSet<i64> = applied_versions(pool, ctx).await?.into_iter().collect();
    Ok(all()
        .iter()
        .filter(|migration| !applied.contains(&migration.version))
        .collect())
}

/// Applies one migration under the sqlx migration lock.
///
/// A runner that finds the version already applied once it holds the lock
/// skips it and returns `false`.
pub async fn apply_migration(
    pool: &PgPool,
    ctx: &SchemaContext,
    migration: &Migration,
) -> Result<bool, DbError> {
    let [up, _] = migration.to_sqlx(ctx);
    let mut conn = migration_connection(pool, ctx).await?;

    conn.lock().await?;
    let applied = if applied_on(&mut conn).await?.contains(&migration.version) {
        tracing::debug!(version = migration.version, "Migration already applied, skipping.");
        false
    } else {
        let elapsed = conn.apply(&up).await?;
        tracing::info!(
            version = migration.version,
            description = migration.description,
            ?elapsed,
            "Applied migration."
        );
        true
    };
    conn.unlock().await?;
    conn.close().await?;

    Ok(applied)
}

/// A connection taken out of the pool for migration work.
///
/// The internal schema and sqlx's history table are created under the
/// migration lock, and the session search path points at the internal schema.
/// The connection is detached so the altered search path never returns to
/// the pool.
async fn migration_connection(pool: &PgPool, ctx: &SchemaContext) -> Result<PgConnection, DbError> {
    let mut conn = pool.acquire().await?.detach();

    conn.lock().await?;
    sqlx::raw_sql(&format!("CREATE SCHEMA IF NOT EXISTS {};", ctx.schema()))
        .execute(&mut conn)
        .await?;
    sqlx::raw_sql(&ctx.internal_search_path())
        .execute(&mut conn)
        .await?;
    conn.ensure_migrations_table().await?;
    conn.unlock().await?;

    Ok(conn)
}

async fn applied_on(conn: &mut PgConnection) -> Result<HashSet<i64>, DbError> {
    Ok(conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|applied| applied.version)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SchemaContext {
        SchemaContext::new("restoration", "restoration_dapi_v1").unwrap()
    }

    #[test]
    fn test_versions_are_unique_and_ascending() {
        let versions: Vec<i64> = all().iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]), "{versions:?}");
    }

    #[test]
    fn test_versions_are_timestamps() {
        for migration in all() {
            let text = migration.version.to_string();
            assert_eq!(text.len(), 14, "{text} is not YYYYMMDDHHMMSS");
            assert!(text.starts_with("20"));
        }
    }

    #[test]
    fn test_down_is_always_empty() {
        let ctx = ctx();
        for migration in all() {
            assert!(migration.down(&ctx).is_empty(), "{} has a down script", migration.version);
        }
    }

    #[test]
    fn test_every_up_sets_search_path_first() {
        let ctx = ctx();
        for migration in all() {
            let sql = migration.up(&ctx);
            let first = sql
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty() && !line.starts_with("--") && !line.starts_with("CREATE SCHEMA"))
                .unwrap_or_default();
            assert_eq!(first, ctx.migration_search_path(), "migration {}", migration.version);
        }
    }

    #[test]
    fn test_every_up_touches_the_api_schema() {
        let ctx = ctx();
        for migration in all() {
            let sql = migration.up(&ctx);
            assert!(sql.contains("restoration_dapi_v1."), "migration {}", migration.version);
        }
    }

    #[test]
    fn test_up_follows_configured_schema_names() {
        let custom = SchemaContext::new("biohub", "biohub_dapi_v1").unwrap();
        for migration in all() {
            let sql = migration.up(&custom);
            assert!(!sql.contains("restoration"), "migration {} hardcodes a schema", migration.version);
        }
    }

    #[test]
    fn test_sqlx_pairs_have_empty_down_scripts() {
        let [up, down] = all()[1].to_sqlx(&ctx());
        assert_eq!(up.version, 20220301120000);
        assert_eq!(up.migration_type, MigrationType::ReversibleUp);
        assert!(up.sql.contains("ADD COLUMN comments"));
        assert_eq!(down.version, up.version);
        assert_eq!(down.migration_type, MigrationType::ReversibleDown);
        assert!(down.sql.is_empty());
    }

    #[tokio::test]
    async fn test_source_resolves_every_step_in_order() {
        let resolved = SchemaMigrations::new(&ctx()).resolve().await.unwrap();
        assert_eq!(resolved.len(), all().len() * 2);

        let ups: Vec<i64> = resolved
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .map(|m| m.version)
            .collect();
        let expected: Vec<i64> = all().iter().map(|m| m.version).collect();
        assert_eq!(ups, expected);
    }

    #[tokio::test]
    async fn test_checksums_follow_schema_names() {
        let first = migrator(&ctx()).await.unwrap();
        let again = migrator(&ctx()).await.unwrap();
        let other = migrator(&SchemaContext::new("biohub", "biohub_dapi_v1").unwrap())
            .await
            .unwrap();

        let checksums = |m: &Migrator| -> Vec<Vec<u8>> {
            m.iter().map(|step| step.checksum.to_vec()).collect()
        };
        assert_eq!(checksums(&first), checksums(&again));
        assert_ne!(checksums(&first)[0], checksums(&other)[0]);
    }

    #[test]
    fn test_treatment_unit_geometry_must_be_an_array() {
        let sql = all()[5].up(&ctx());
        assert!(sql.contains("SET geojson = jsonb_build_array(geojson)"));
        assert!(sql.contains("CHECK (jsonb_typeof(geojson) = 'array')"));
        assert!(sql.contains("CREATE VIEW restoration_dapi_v1.treatment_unit AS"));
    }

    #[test]
    fn test_initial_schema_defines_constant_function() {
        let sql = all()[0].up(&ctx());
        assert!(sql.contains("FUNCTION api_get_character_system_metadata_constant"));
        for view in ["project", "treatment_unit", "treatment", "system_constant", "investment_action_category"] {
            assert!(
                sql.contains(&format!("CREATE VIEW restoration_dapi_v1.{view} AS")),
                "missing view {view}"
            );
        }
    }
}
