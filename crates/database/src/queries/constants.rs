use crate::sql::{SqlBuilder, SqlStatement};
use core_types::SystemConstant;

/// Looks up a character-valued system constant through the database function.
///
/// Returns one column, `constant`. The row is absent, or the value `NULL`,
/// when the constant has not been configured.
pub fn get_system_constant_sql(constant: SystemConstant) -> SqlStatement {
    let mut builder = SqlBuilder::new("SELECT api_get_character_system_metadata_constant(");
    builder.push_bind(constant.as_str()).push(") AS constant");
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn test_constant_name_is_bound_not_inlined() {
        let statement = get_system_constant_sql(SystemConstant::OrganizationNameFull);

        assert_eq!(
            statement.sql(),
            "SELECT api_get_character_system_metadata_constant($1) AS constant"
        );
        assert_eq!(
            statement.params(),
            [SqlParam::Text("ORGANIZATION_NAME_FULL".to_string())]
        );
        assert!(!statement.sql().contains("ORGANIZATION_NAME_FULL"));
    }

    #[test]
    fn test_each_constant_binds_its_own_name() {
        for constant in SystemConstant::ALL {
            let statement = get_system_constant_sql(constant);
            assert_eq!(statement.params(), [SqlParam::Text(constant.as_str().to_string())]);
        }
    }
}
