use crate::schema::SchemaContext;

pub(super) fn up(ctx: &SchemaContext) -> String {
    format!(
        r#"
{search_path}

INSERT INTO system_constant (constant_name, character_value, description) VALUES
    (
        'ORGANIZATION_NAME_FULL',
        'Ministry of Land, Water and Resource Stewardship',
        'Full name of the organization responsible for the tracker.'
    ),
    (
        'ORGANIZATION_URL',
        'https://www2.gov.bc.ca/gov/content/governments/organizational-structure/ministries-organizations/ministries/land-water-and-resource-stewardship',
        'Home page of the organization responsible for the tracker.'
    )
ON CONFLICT (constant_name) DO UPDATE
SET
    character_value = EXCLUDED.character_value,
    description = EXCLUDED.description;

{view}"#,
        search_path = ctx.migration_search_path(),
        view = ctx.compatibility_view("system_constant"),
    )
}
