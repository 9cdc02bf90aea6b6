use crate::schema::SchemaContext;

/// Treatment unit geometry is always a list of features. Single features
/// stored before this constraint are wrapped in a one-element array.
pub(super) fn up(ctx: &SchemaContext) -> String {
    format!(
        r#"
{search_path}

UPDATE treatment_unit
SET geojson = jsonb_build_array(geojson)
WHERE jsonb_typeof(geojson) <> 'array';

ALTER TABLE treatment_unit
    ADD CONSTRAINT treatment_unit_geojson_is_array CHECK (jsonb_typeof(geojson) = 'array');

{view}"#,
        search_path = ctx.migration_search_path(),
        view = ctx.compatibility_view("treatment_unit"),
    )
}
