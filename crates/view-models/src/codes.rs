use core_types::{CodeRow, CodeSetRows, InvestmentActionCategoryRow};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Code {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentActionCategoryCode {
    pub id: i32,
    pub fs_id: i32,
    pub name: String,
}

/// The code-set payload the browser loads once per session.
/// The keys are fixed; an empty reference table gives an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllCodeSets {
    pub first_nations: Vec<Code>,
    pub funding_source: Vec<Code>,
    pub investment_action_category: Vec<InvestmentActionCategoryCode>,
    pub regions: Vec<Code>,
    pub species: Vec<Code>,
    pub system_roles: Vec<Code>,
    pub project_roles: Vec<Code>,
    pub administrative_activity_status_type: Vec<Code>,
}

impl From<CodeRow> for Code {
    fn from(row: CodeRow) -> Self {
        Self { id: row.id, name: row.name }
    }
}

impl From<InvestmentActionCategoryRow> for InvestmentActionCategoryCode {
    fn from(row: InvestmentActionCategoryRow) -> Self {
        Self {
            id: row.id,
            fs_id: row.fs_id,
            name: row.name,
        }
    }
}

fn codes(rows: Vec<CodeRow>) -> Vec<Code> {
    rows.into_iter().map(Code::from).collect()
}

impl From<CodeSetRows> for AllCodeSets {
    fn from(rows: CodeSetRows) -> Self {
        Self {
            first_nations: codes(rows.first_nations),
            funding_source: codes(rows.funding_source),
            investment_action_category: rows
                .investment_action_category
                .into_iter()
                .map(InvestmentActionCategoryCode::from)
                .collect(),
            regions: codes(rows.regions),
            species: codes(rows.species),
            system_roles: codes(rows.system_roles),
            project_roles: codes(rows.project_roles),
            administrative_activity_status_type: codes(rows.administrative_activity_status_type),
        }
    }
}
