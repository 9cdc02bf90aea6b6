use crate::sql::SqlStatement;

/// The reference tables that share the plain `{id, name}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTable {
    FirstNations,
    FundingSource,
    Region,
    Species,
    SystemRole,
    ProjectRole,
    AdministrativeActivityStatusType,
}

impl CodeTable {
    pub const ALL: [CodeTable; 7] = [
        Self::FirstNations,
        Self::FundingSource,
        Self::Region,
        Self::Species,
        Self::SystemRole,
        Self::ProjectRole,
        Self::AdministrativeActivityStatusType,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            CodeTable::FirstNations => "first_nations",
            CodeTable::FundingSource => "funding_source",
            CodeTable::Region => "region",
            CodeTable::Species => "species",
            CodeTable::SystemRole => "system_role",
            CodeTable::ProjectRole => "project_role",
            CodeTable::AdministrativeActivityStatusType => "administrative_activity_status_type",
        }
    }
}

/// Active (not end-dated) codes of one reference table, ordered by name.
pub fn get_code_set_sql(code_table: CodeTable) -> SqlStatement {
    let table = code_table.table();
    SqlStatement::new(format!(
        "SELECT {table}_id AS id, name FROM {table} WHERE record_end_date IS NULL ORDER BY name;"
    ))
}

pub fn get_investment_action_category_sql() -> SqlStatement {
    SqlStatement::new(
        r#"
        SELECT
            investment_action_category_id AS id,
            funding_source_id AS fs_id,
            name
        FROM
            investment_action_category
        WHERE
            record_end_date IS NULL
        ORDER BY
            funding_source_id, name;
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_set_sql_uses_table_key() {
        let statement = get_code_set_sql(CodeTable::Region);
        assert_eq!(
            statement.sql(),
            "SELECT region_id AS id, name FROM region WHERE record_end_date IS NULL ORDER BY name;"
        );
        assert!(statement.params().is_empty());
    }

    #[test]
    fn test_every_table_has_a_statement() {
        for code_table in CodeTable::ALL {
            let statement = get_code_set_sql(code_table);
            assert!(statement.sql().contains(&format!("FROM {} ", code_table.table())));
        }
    }

    #[test]
    fn test_investment_action_category_exposes_fs_id() {
        assert!(get_investment_action_category_sql().sql().contains("funding_source_id AS fs_id"));
    }
}
