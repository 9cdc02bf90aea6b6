use chrono::NaiveDate;
use core_types::ProjectRow;
use serde::Serialize;

/// The published view of a project or plan (`GetPublicProjectData`).
///
/// Always carries exactly these four keys, whatever the source looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProjectData {
    pub project_name: String,
    pub is_project: Option<bool>,
    pub start_date: String,
    pub end_date: String,
}

impl PublicProjectData {
    pub fn from_row(row: Option<&ProjectRow>) -> Self {
        Self {
            project_name: row.and_then(|r| r.name.clone()).unwrap_or_default(),
            is_project: row.and_then(|r| r.is_project),
            start_date: format_date(row.and_then(|r| r.start_date)),
            end_date: format_date(row.and_then(|r| r.end_date)),
        }
    }
}

impl From<Option<&ProjectRow>> for PublicProjectData {
    fn from(row: Option<&ProjectRow>) -> Self {
        Self::from_row(row)
    }
}

/// The administrative view of a project (`GetProjectData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    pub project_name: String,
    pub is_project: Option<bool>,
    pub start_date: String,
    pub end_date: String,
    pub objectives: String,
    pub publish_date: String,
    pub revision_count: i32,
}

impl ProjectData {
    pub fn from_row(row: Option<&ProjectRow>) -> Self {
        let public = PublicProjectData::from_row(row);
        Self {
            project_name: public.project_name,
            is_project: public.is_project,
            start_date: public.start_date,
            end_date: public.end_date,
            objectives: row.and_then(|r| r.objectives.clone()).unwrap_or_default(),
            publish_date: format_date(row.and_then(|r| r.publish_date)),
            revision_count: row.and_then(|r| r.revision_count).unwrap_or_default(),
        }
    }
}

impl From<Option<&ProjectRow>> for ProjectData {
    fn from(row: Option<&ProjectRow>) -> Self {
        Self::from_row(row)
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}
