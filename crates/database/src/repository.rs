use crate::queries::codes::{get_code_set_sql, get_investment_action_category_sql, CodeTable};
use crate::queries::constants::get_system_constant_sql;
use crate::queries::project::{get_project_sql, get_public_project_sql};
use crate::queries::search::{get_public_search_sql, SearchCriteria};
use crate::queries::treatment::{get_treatment_years_sql, get_treatments_sql};
use core_types::{
    ApiError, CodeRow, CodeSetRows, ConstantRow, InvestmentActionCategoryRow, ProjectRow,
    SearchRow, SystemConstant, TreatmentRow,
};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Statement construction failures surface as `BUILD_SQL` errors before the
/// pool is touched; anything the database rejects surfaces as `EXECUTE_SQL`.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetches the public fields of a published project; `None` if it does not
    /// exist or is unpublished.
    pub async fn get_public_project(&self, project_id: i32) -> Result<Option<ProjectRow>, ApiError> {
        let statement = get_public_project_sql(project_id)?;
        let row = statement
            .query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to get project data").with_error(e))?;
        Ok(row)
    }

    /// Fetches a project with its administrative fields, published or not.
    pub async fn get_project(&self, project_id: i32) -> Result<Option<ProjectRow>, ApiError> {
        let statement = get_project_sql(project_id)?;
        let row = statement
            .query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to get project data").with_error(e))?;
        Ok(row)
    }

    /// Fetches the flat unit × treatment rows of a published project,
    /// optionally restricted to some treatment years.
    pub async fn get_public_treatments(
        &self,
        project_id: i32,
        years: &[i32],
    ) -> Result<Vec<TreatmentRow>, ApiError> {
        let statement = get_treatments_sql(project_id, years)?;
        let rows = statement
            .query_as::<TreatmentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to get treatment data").with_error(e))?;

        tracing::debug!(project_id, rows = rows.len(), "Fetched treatment rows.");
        Ok(rows)
    }

    /// The distinct treatment years of a published project, ascending.
    pub async fn get_public_treatment_years(&self, project_id: i32) -> Result<Vec<i32>, ApiError> {
        let statement = get_treatment_years_sql(project_id)?;
        let years = statement
            .query_as::<(i32,)>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to get treatment years").with_error(e))?;
        Ok(years.into_iter().map(|(year,)| year).collect())
    }

    /// Searches published projects and plans.
    pub async fn search_public_projects(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<SearchRow>, ApiError> {
        let statement = get_public_search_sql(criteria)?;
        let rows = statement
            .query_as::<SearchRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to search projects").with_error(e))?;
        Ok(rows)
    }

    /// Fetches the active codes of one `{id, name}` reference table.
    pub async fn get_code_set(&self, code_table: CodeTable) -> Result<Vec<CodeRow>, ApiError> {
        let statement = get_code_set_sql(code_table);
        let rows = statement
            .query_as::<CodeRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ApiError::execute_sql(format!("Failed to get {} codes", code_table.table())).with_error(e)
            })?;
        Ok(rows)
    }

    pub async fn get_investment_action_categories(
        &self,
    ) -> Result<Vec<InvestmentActionCategoryRow>, ApiError> {
        let statement = get_investment_action_category_sql();
        let rows = statement
            .query_as::<InvestmentActionCategoryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ApiError::execute_sql("Failed to get investment_action_category codes").with_error(e)
            })?;
        Ok(rows)
    }

    /// Fetches every code set. The selects are independent, so they run concurrently.
    pub async fn get_all_code_sets(&self) -> Result<CodeSetRows, ApiError> {
        let (
            first_nations,
            funding_source,
            investment_action_category,
            regions,
            species,
            system_roles,
            project_roles,
            administrative_activity_status_type,
        ) = tokio::try_join!(
            self.get_code_set(CodeTable::FirstNations),
            self.get_code_set(CodeTable::FundingSource),
            self.get_investment_action_categories(),
            self.get_code_set(CodeTable::Region),
            self.get_code_set(CodeTable::Species),
            self.get_code_set(CodeTable::SystemRole),
            self.get_code_set(CodeTable::ProjectRole),
            self.get_code_set(CodeTable::AdministrativeActivityStatusType),
        )?;

        Ok(CodeSetRows {
            first_nations,
            funding_source,
            investment_action_category,
            regions,
            species,
            system_roles,
            project_roles,
            administrative_activity_status_type,
        })
    }

    /// Looks up a system constant. `None` means it is not configured.
    pub async fn get_system_constant(
        &self,
        constant: SystemConstant,
    ) -> Result<Option<String>, ApiError> {
        let statement = get_system_constant_sql(constant);
        let row = statement
            .query_as::<ConstantRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::execute_sql("Failed to get system constant").with_error(e))?;

        let value = row.and_then(|row| row.constant);
        if value.is_none() {
            tracing::warn!(constant = %constant, "System constant is not configured.");
        }
        Ok(value)
    }
}
