use crate::schema::SchemaContext;

pub(super) fn up(ctx: &SchemaContext) -> String {
    format!(
        r#"
{search_path}

ALTER TABLE treatment_unit ADD COLUMN comments varchar(3000);

COMMENT ON COLUMN treatment_unit.comments IS 'Free-form notes recorded against the treatment unit.';

{view}"#,
        search_path = ctx.migration_search_path(),
        view = ctx.compatibility_view("treatment_unit"),
    )
}
