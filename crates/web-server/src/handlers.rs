use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use core_types::{
    ActivityJson, CamperJson, CamperView, SignupJson, SignupView, ValidationError,
    validate_camper_changes, validate_new_camper, validate_new_signup,
};
use serde_json::Value;
use std::sync::Arc;

/// Unwraps a JSON body, treating a malformed or missing one as a validation failure.
fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ValidationError::single(rejection.body_text()).into()),
    }
}

/// # GET /
pub async fn home() -> &'static str {
    ""
}

/// # GET /campers
/// Lists every camper without their signups.
pub async fn list_campers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CamperJson>>, AppError> {
    let mut uow = state.db_repo.begin().await?;
    let campers = uow.list_campers().await?;
    uow.commit().await?;

    let views = campers
        .iter()
        .map(|camper| CamperView::Summary.project(camper, &[]))
        .collect();
    Ok(Json(views))
}

/// # POST /campers
pub async fn create_camper(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CamperJson>), AppError> {
    let new_camper = validate_new_camper(&payload(body)?)?;

    let mut uow = state.db_repo.begin_write().await?;
    let camper = uow.insert_camper(&new_camper).await?;
    let signups = uow.camper_signups(camper.id).await?;
    uow.commit().await?;

    tracing::info!(camper_id = camper.id, "Camper created.");
    Ok((
        StatusCode::CREATED,
        Json(CamperView::WithSignups.project(&camper, &signups)),
    ))
}

/// # GET /campers/{id}
/// Returns the camper with each signup and the activity it books.
pub async fn get_camper(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CamperJson>, AppError> {
    let mut uow = state.db_repo.begin().await?;
    let camper = uow
        .find_camper(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Camper not found".to_string()))?;
    let signups = uow.camper_signups(id).await?;
    uow.commit().await?;

    Ok(Json(CamperView::WithSignups.project(&camper, &signups)))
}

/// # PATCH /campers/{id}
/// Applies an allow-listed partial update. A missing camper is reported
/// before the payload is looked at.
pub async fn update_camper(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CamperJson>), AppError> {
    let mut uow = state.db_repo.begin_write().await?;
    if uow.find_camper(id).await?.is_none() {
        return Err(AppError::NotFound("Camper not found".to_string()));
    }

    let changes = validate_camper_changes(&payload(body)?)?;
    let camper = uow
        .update_camper(id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Camper not found".to_string()))?;
    uow.commit().await?;

    tracing::info!(camper_id = id, "Camper updated.");
    Ok((
        StatusCode::ACCEPTED,
        Json(CamperView::Summary.project(&camper, &[])),
    ))
}

/// # GET /activities
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActivityJson>>, AppError> {
    let mut uow = state.db_repo.begin().await?;
    let activities = uow.list_activities().await?;
    uow.commit().await?;

    Ok(Json(activities.iter().map(ActivityJson::from).collect()))
}

/// # DELETE /activities/{id}
/// Removes the activity together with every signup that books it.
pub async fn delete_activity(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let mut uow = state.db_repo.begin_write().await?;
    if !uow.delete_activity(id).await? {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }
    uow.commit().await?;

    tracing::info!(activity_id = id, "Activity deleted.");
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /signups
///
/// The referenced camper and activity are looked up in the same unit of work,
/// so a dangling reference is reported as a client error. The foreign keys
/// remain the final check on the insert itself.
pub async fn create_signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupJson>), AppError> {
    let new_signup = validate_new_signup(&payload(body)?)?;

    let mut uow = state.db_repo.begin_write().await?;
    let camper = uow.find_camper(new_signup.camper_id).await?.ok_or_else(|| {
        AppError::Integrity(format!("camper {} does not exist", new_signup.camper_id))
    })?;
    let activity = uow.find_activity(new_signup.activity_id).await?.ok_or_else(|| {
        AppError::Integrity(format!("activity {} does not exist", new_signup.activity_id))
    })?;
    let signup = uow.insert_signup(&new_signup).await?;
    uow.commit().await?;

    tracing::info!(
        signup_id = signup.id,
        camper_id = camper.id,
        activity_id = activity.id,
        "Signup created."
    );
    let view = SignupView::WithCamperAndActivity.project(&signup, Some(&camper), Some(&activity));
    Ok((StatusCode::CREATED, Json(view)))
}
