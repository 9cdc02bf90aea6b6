use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use core_types::SystemConstant;
use database::queries::search::SearchCriteria;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use view_models::{
    group_treatment_units, AllCodeSets, ProjectData, PublicProjectData, SearchResult, TreatmentUnit,
};

#[derive(Debug, Serialize)]
pub struct PublicProjectResponse {
    pub project: PublicProjectData,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: ProjectData,
}

#[derive(Debug, Serialize)]
pub struct ConstantResponse {
    pub constant: String,
}

#[derive(Debug, Deserialize)]
pub struct TreatmentFilter {
    /// Comma-separated treatment years, e.g. `2020,2021`.
    years: Option<String>,
}

impl TreatmentFilter {
    fn years(&self) -> Result<Vec<i32>, AppError> {
        let Some(years) = self.years.as_deref() else {
            return Ok(Vec::new());
        };
        years
            .split(',')
            .map(str::trim)
            .filter(|year| !year.is_empty())
            .map(|year| {
                year.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid treatment year: {year}")))
            })
            .collect()
    }
}

/// # GET /api/public/projects/:project_id
pub async fn get_public_project(
    WithRejection(Path(project_id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicProjectResponse>, AppError> {
    let row = state
        .db_repo
        .get_public_project(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))?;

    Ok(Json(PublicProjectResponse {
        project: PublicProjectData::from_row(Some(&row)),
    }))
}

/// # GET /api/public/projects/:project_id/treatments
/// Treatment units with their treatments, optionally filtered by `?years=`.
pub async fn get_public_treatments(
    WithRejection(Path(project_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Query(filter), _): WithRejection<Query<TreatmentFilter>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TreatmentUnit>>, AppError> {
    let years = filter.years()?;
    let rows = state.db_repo.get_public_treatments(project_id, &years).await?;
    Ok(Json(group_treatment_units(rows)))
}

/// # GET /api/public/projects/:project_id/treatments/years
pub async fn get_public_treatment_years(
    WithRejection(Path(project_id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<i32>>, AppError> {
    let years = state.db_repo.get_public_treatment_years(project_id).await?;
    Ok(Json(years))
}

/// # GET /api/public/search
pub async fn search_public_projects(
    WithRejection(Query(criteria), _): WithRejection<Query<SearchCriteria>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let rows = state.db_repo.search_public_projects(&criteria).await?;
    Ok(Json(rows.into_iter().map(SearchResult::from).collect()))
}

/// # GET /api/projects/:project_id
/// The administrative view; includes unpublished projects.
pub async fn get_project(
    WithRejection(Path(project_id), _): WithRejection<Path<i32>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectResponse>, AppError> {
    let row = state
        .db_repo
        .get_project(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))?;

    Ok(Json(ProjectResponse {
        project: ProjectData::from_row(Some(&row)),
    }))
}

/// # GET /api/codes
pub async fn get_all_codes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AllCodeSets>, AppError> {
    let rows = state.db_repo.get_all_code_sets().await?;
    Ok(Json(AllCodeSets::from(rows)))
}

/// # GET /api/constants/:name
pub async fn get_system_constant(
    WithRejection(Path(name), _): WithRejection<Path<String>, AppError>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConstantResponse>, AppError> {
    let constant: SystemConstant = name
        .parse()
        .map_err(|e: core_types::UnknownConstant| AppError::BadRequest(e.to_string()))?;

    let value = state
        .db_repo
        .get_system_constant(constant)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("System constant {constant} is not configured")))?;

    Ok(Json(ConstantResponse { constant: value }))
}
