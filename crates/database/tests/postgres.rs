//! Runs the migrations and the public queries against a real PostgreSQL.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`. Each test
//! works in its own pair of schemas and drops them afterwards.

use database::queries::search::SearchCriteria;
use database::{connect, migrations, run_migrations, DbRepository, PoolSettings, SchemaContext};
use sqlx::PgPool;
use std::time::Duration;

async fn setup(name: &str) -> (PgPool, SchemaContext) {
    let schema = format!("restoration_test_{name}_{}", std::process::id());
    let ctx = SchemaContext::new(schema.clone(), format!("{schema}_api")).unwrap();
    let settings = PoolSettings {
        url: None,
        max_connections: 2,
        acquire_timeout: Duration::from_secs(10),
    };
    let pool = connect(&settings, &ctx).await.unwrap();
    (pool, ctx)
}

async fn teardown(pool: PgPool, ctx: &SchemaContext) {
    sqlx::raw_sql(&format!(
        "DROP SCHEMA IF EXISTS {} CASCADE; DROP SCHEMA IF EXISTS {} CASCADE;",
        ctx.api_schema(),
        ctx.schema()
    ))
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;
}

async fn insert_project(pool: &PgPool, ctx: &SchemaContext, name: &str, is_project: bool, published: bool) -> i32 {
    let sql = format!(
        "INSERT INTO {}.project (name, is_project, start_date, publish_timestamp)
         VALUES ($1, $2, DATE '2020-04-01', CASE WHEN $3 THEN now() END)
         RETURNING project_id",
        ctx.schema()
    );
    sqlx::query_scalar::<_, i32>(&sql)
        .bind(name)
        .bind(is_project)
        .bind(published)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_location(pool: &PgPool, ctx: &SchemaContext, project_id: i32) {
    let sql = format!(
        r#"INSERT INTO {}.project_location (project_id, geojson)
           VALUES ($1, '{{"type": "Feature", "geometry": null, "properties": {{}}}}'::jsonb)"#,
        ctx.schema()
    );
    sqlx::query(&sql).bind(project_id).execute(pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_migrations_are_idempotent() {
    let (pool, ctx) = setup("migrate").await;

    let first = run_migrations(&pool, &ctx).await.unwrap();
    assert_eq!(first.len(), migrations::all().len());
    assert!(run_migrations(&pool, &ctx).await.unwrap().is_empty());
    assert!(migrations::pending_migrations(&pool, &ctx).await.unwrap().is_empty());

    teardown(pool, &ctx).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_public_search_runs_against_the_views() {
    let (pool, ctx) = setup("search").await;
    run_migrations(&pool, &ctx).await.unwrap();

    let fence = insert_project(&pool, &ctx, "Caribou Fence Line", true, true).await;
    insert_location(&pool, &ctx, fence).await;
    insert_location(&pool, &ctx, fence).await;
    insert_project(&pool, &ctx, "Moose Habitat Plan", false, true).await;
    insert_project(&pool, &ctx, "Unpublished Fence", true, false).await;

    let repo = DbRepository::new(pool.clone());

    let everything = repo.search_public_projects(&SearchCriteria::default()).await.unwrap();
    let names: Vec<_> = everything.iter().map(|row| row.name.clone().unwrap_or_default()).collect();
    assert_eq!(names, ["Caribou Fence Line", "Moose Habitat Plan"]);
    assert_eq!(everything[0].geometry.as_ref().and_then(|g| g.as_array()).map(Vec::len), Some(2));
    assert!(everything[1].geometry.is_none());

    let by_keyword = repo
        .search_public_projects(&SearchCriteria {
            keyword: Some("fence".to_string()),
            is_project: None,
        })
        .await
        .unwrap();
    assert_eq!(by_keyword.len(), 1);
    assert_eq!(by_keyword[0].id, fence);

    let plans = repo
        .search_public_projects(&SearchCriteria {
            keyword: None,
            is_project: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].is_project, Some(false));

    drop(repo);
    teardown(pool, &ctx).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_treatment_unit_geometry_must_be_an_array() {
    let (pool, ctx) = setup("geojson").await;
    run_migrations(&pool, &ctx).await.unwrap();
    let project_id = insert_project(&pool, &ctx, "Linear Features", true, true).await;

    let sql = format!(
        "INSERT INTO {}.treatment_unit (project_id, name, geojson) VALUES ($1, $2, $3::jsonb)",
        ctx.schema()
    );
    let single_feature = sqlx::query(&sql)
        .bind(project_id)
        .bind("TU1")
        .bind(r#"{"type": "Feature"}"#)
        .execute(&pool)
        .await;
    assert!(single_feature.is_err());

    sqlx::query(&sql)
        .bind(project_id)
        .bind("TU2")
        .bind(r#"[{"type": "Feature"}]"#)
        .execute(&pool)
        .await
        .unwrap();

    teardown(pool, &ctx).await;
}
