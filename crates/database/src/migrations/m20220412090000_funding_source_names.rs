use crate::schema::SchemaContext;

/// Renames a funding source to its programme name and retires one that no
/// longer funds projects, together with its investment action categories.
pub(super) fn up(ctx: &SchemaContext) -> String {
    format!(
        r#"
{search_path}

UPDATE funding_source
SET name = 'Federal Species at Risk Recovery Fund'
WHERE name = 'Federal Species at Risk';

DELETE FROM investment_action_category
WHERE funding_source_id IN (
    SELECT funding_source_id FROM funding_source WHERE name = 'Forest Enhancement Society of BC'
);

DELETE FROM funding_source
WHERE name = 'Forest Enhancement Society of BC';

{funding_source_view}
{investment_action_category_view}"#,
        search_path = ctx.migration_search_path(),
        funding_source_view = ctx.compatibility_view("funding_source"),
        investment_action_category_view = ctx.compatibility_view("investment_action_category"),
    )
}
