//! Shell handlers: create, list, get, update, delete, generate example id.

use crate::codec::{decode_id, encode_id};
use crate::error::{is_unique_violation, AppError, ErrorBody};
use crate::model::{ModelType, ShellForm, ShellUpdateForm};
use crate::response::{DeletedBody, GeneratedIdBody, ShellListBody, ShellView};
use crate::service::{self, ShellService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde::Deserialize;
use utoipa::IntoParams;

const NOT_FOUND_MSG: &str = "Asset Administration Shell not found";
const NOT_FOUND_IN_DB_MSG: &str = "Asset Administration Shell not found in database";

/// Single-shell lookup parameters. `aas_id` carries the codec-encoded
/// identifier, never the plain one.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// URL-safe Base64 of the percent-encoded `aas_id`.
    pub aas_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateIdQuery {
    /// Identifier family to synthesize: `aas` or `asset`.
    pub type_model: ModelType,
}

/// Creates a new Asset Administration Shell.
#[utoipa::path(
    post,
    path = "/aas",
    tag = "Asset Administration Shell",
    request_body = ShellForm,
    responses(
        (status = 200, description = "Shell created", body = ShellView),
        (status = 400, description = "Required fields missing or persistence fault", body = ErrorBody),
        (status = 409, description = "aas_id or id_short already taken", body = ErrorBody),
    )
)]
pub async fn create_shell(
    State(state): State<AppState>,
    Json(mut form): Json<ShellForm>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    service::normalize(&mut form);
    if !service::has_required_fields(&form) {
        tracing::warn!("error creating shell: {}", service::REQUIRED_FIELDS_MSG);
        return Err(AppError::Validation(service::REQUIRED_FIELDS_MSG.to_string()));
    }

    tracing::debug!(aas_id = %form.aas_id, "creating shell");
    let mut tx = state.pool.begin().await?;

    if ShellService::find_by_aas_id(&mut tx, &form.aas_id)
        .await?
        .is_some()
    {
        let msg = format!(
            "Asset Administration Shell already exists with ID: {}",
            form.aas_id
        );
        tracing::warn!(aas_id = %form.aas_id, "error creating shell: {}", msg);
        return Err(AppError::Conflict(msg));
    }
    if ShellService::find_by_id_short(&mut tx, &form.id_short)
        .await?
        .is_some()
    {
        let msg = format!(
            "Asset Administration Shell already exists with Id Short: {}",
            form.id_short
        );
        tracing::warn!(id_short = %form.id_short, "error creating shell: {}", msg);
        return Err(AppError::Conflict(msg));
    }

    // The advisory checks above are racy by nature; the UNIQUE constraint is
    // the authoritative backstop and maps to the same 409.
    let created = match ShellService::insert(&mut tx, &form).await {
        Ok(row) => row,
        Err(AppError::Db(ref e)) if is_unique_violation(e) => {
            tracing::warn!(aas_id = %form.aas_id, "error creating shell: constraint violation");
            return Err(AppError::Conflict(
                "Asset Administration Shell already exists".to_string(),
            ));
        }
        Err(AppError::Db(e)) => {
            tracing::warn!(aas_id = %form.aas_id, error = %e, "error creating shell");
            return Err(AppError::BadRequest(
                "Could not save new Asset Administration Shell".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };
    if let Err(e) = tx.commit().await {
        tracing::warn!(aas_id = %form.aas_id, error = %e, "error creating shell");
        return Err(AppError::BadRequest(
            "Could not save new Asset Administration Shell".to_string(),
        ));
    }

    tracing::debug!(aas_id = %created.aas_id, "shell created");
    Ok((axum::http::StatusCode::OK, Json(ShellView::from(created))))
}

/// Returns all Asset Administration Shells.
#[utoipa::path(
    get,
    path = "/aas_list",
    tag = "Asset Administration Shell",
    responses(
        (status = 200, description = "Every stored shell, oldest first", body = ShellListBody),
    )
)]
pub async fn list_shells(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    tracing::debug!("collecting shells");
    let shells = ShellService::list_all(&state.pool).await?;
    tracing::debug!(count = shells.len(), "shells found");
    Ok((axum::http::StatusCode::OK, Json(ShellListBody::new(shells))))
}

/// Returns one Asset Administration Shell by its encoded identifier.
#[utoipa::path(
    get,
    path = "/aas",
    tag = "Asset Administration Shell",
    params(SearchQuery),
    responses(
        (status = 200, description = "The matching shell", body = ShellView),
        (status = 404, description = "No match, or the identifier did not decode", body = ErrorBody),
    )
)]
pub async fn get_shell(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let aas_id = decode_id(&query.aas_id).map_err(|e| {
        tracing::warn!(encoded = %query.aas_id, error = %e, "identifier did not decode");
        AppError::NotFound(NOT_FOUND_MSG.to_string())
    })?;
    tracing::debug!(aas_id = %aas_id, "collecting shell");

    let mut conn = state.pool.acquire().await?;
    let shell = ShellService::find_by_aas_id(&mut conn, &aas_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(aas_id = %aas_id, "error finding shell: {}", NOT_FOUND_MSG);
            AppError::NotFound(NOT_FOUND_MSG.to_string())
        })?;

    tracing::debug!(aas_id = %aas_id, "shell found");
    Ok((axum::http::StatusCode::OK, Json(ShellView::from(shell))))
}

/// Deletes an Asset Administration Shell by its encoded identifier.
#[utoipa::path(
    delete,
    path = "/aas",
    tag = "Asset Administration Shell",
    params(SearchQuery),
    responses(
        (status = 200, description = "Shell deleted", body = DeletedBody),
        (status = 404, description = "No match, or the identifier did not decode", body = ErrorBody),
    )
)]
pub async fn delete_shell(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let aas_id = decode_id(&query.aas_id).map_err(|e| {
        tracing::warn!(encoded = %query.aas_id, error = %e, "identifier did not decode");
        AppError::NotFound(NOT_FOUND_IN_DB_MSG.to_string())
    })?;
    tracing::debug!(aas_id = %aas_id, "deleting shell");

    let mut tx = state.pool.begin().await?;
    let removed = ShellService::delete_by_aas_id(&mut tx, &aas_id).await?;
    tx.commit().await?;

    if removed == 0 {
        tracing::warn!(aas_id = %aas_id, "error deleting shell: {}", NOT_FOUND_IN_DB_MSG);
        return Err(AppError::NotFound(NOT_FOUND_IN_DB_MSG.to_string()));
    }
    tracing::debug!(aas_id = %aas_id, "shell deleted");
    Ok((
        axum::http::StatusCode::OK,
        Json(DeletedBody {
            message: "Asset Administration Shell deleted".to_string(),
            aas_id,
        }),
    ))
}

/// Updates an existing Asset Administration Shell wholesale. `aas_id` names
/// the target; `update_aas_id`, when present and different, renames it.
#[utoipa::path(
    put,
    path = "/aas",
    tag = "Asset Administration Shell",
    request_body = ShellUpdateForm,
    responses(
        (status = 200, description = "Updated shell", body = ShellView),
        (status = 400, description = "Required fields missing", body = ErrorBody),
        (status = 404, description = "Target shell not found", body = ErrorBody),
        (status = 409, description = "id_short or replacement aas_id already taken", body = ErrorBody),
    )
)]
pub async fn update_shell(
    State(state): State<AppState>,
    Json(mut form): Json<ShellUpdateForm>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    service::normalize_update(&mut form);
    if !service::has_required_fields(&form.shell) {
        tracing::warn!("error updating shell: {}", service::REQUIRED_FIELDS_MSG);
        return Err(AppError::Validation(service::REQUIRED_FIELDS_MSG.to_string()));
    }

    let aas_id = form.shell.aas_id.clone();
    tracing::debug!(aas_id = %aas_id, "updating shell");
    let mut tx = state.pool.begin().await?;

    if ShellService::find_by_aas_id(&mut tx, &aas_id).await?.is_none() {
        tracing::warn!(aas_id = %aas_id, "error updating shell: {}", NOT_FOUND_IN_DB_MSG);
        return Err(AppError::NotFound(NOT_FOUND_IN_DB_MSG.to_string()));
    }

    if ShellService::find_id_short_conflict(&mut tx, &form.shell.id_short, &aas_id)
        .await?
        .is_some()
    {
        let msg = format!(
            "Another Asset Administration Shell already exists with Id Short: {}",
            form.shell.id_short
        );
        tracing::warn!(aas_id = %aas_id, "error updating shell: {}", msg);
        return Err(AppError::Conflict(msg));
    }

    // Exclusion key for the rename check is the current aas_id, not the
    // candidate; a record may always keep its own identifier.
    let new_aas_id = match form.update_aas_id.as_deref() {
        Some(candidate) if candidate != aas_id => {
            if ShellService::find_aas_id_conflict(&mut tx, candidate, &aas_id)
                .await?
                .is_some()
            {
                let msg = format!(
                    "Another Asset Administration Shell already exists with ID: {}",
                    candidate
                );
                tracing::warn!(aas_id = %aas_id, "error updating shell: {}", msg);
                return Err(AppError::Conflict(msg));
            }
            candidate.to_string()
        }
        _ => aas_id.clone(),
    };

    let updated = match ShellService::update(&mut tx, &aas_id, &new_aas_id, &form.shell).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            tracing::warn!(aas_id = %aas_id, "error updating shell: {}", NOT_FOUND_IN_DB_MSG);
            return Err(AppError::NotFound(NOT_FOUND_IN_DB_MSG.to_string()));
        }
        Err(AppError::Db(ref e)) if is_unique_violation(e) => {
            tracing::warn!(aas_id = %aas_id, "error updating shell: constraint violation");
            return Err(AppError::Conflict(
                "Another Asset Administration Shell already exists".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };
    tx.commit().await?;

    tracing::debug!(aas_id = %updated.aas_id, "shell updated");
    Ok((axum::http::StatusCode::OK, Json(ShellView::from(updated))))
}

/// Synthesizes a plausible identifier and runs it through the codec. Purely
/// illustrative: nothing is persisted and no uniqueness is guaranteed.
#[utoipa::path(
    get,
    path = "/generate_id",
    tag = "Asset Administration Shell",
    params(GenerateIdQuery),
    responses(
        (status = 200, description = "A fresh identifier, plain and encoded", body = GeneratedIdBody),
        (status = 500, description = "The generated identifier did not survive the codec", body = ErrorBody),
    )
)]
pub async fn generate_shell_id(
    Query(query): Query<GenerateIdQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut rng = rand::thread_rng();
    let groups: Vec<String> = (0..4)
        .map(|_| format!("{:04}", rng.gen_range(0..10_000)))
        .collect();
    let plain = format!(
        "https://example.com/ids/{}/{}",
        query.type_model.as_str(),
        groups.join("_")
    );

    let encoded = encode_id(&plain);
    let decoded = decode_id(&encoded).map_err(|e| {
        tracing::warn!(error = %e, "generated identifier did not decode");
        AppError::Encoding("Could not generate a valid Asset Administration Shell ID".to_string())
    })?;

    tracing::debug!(aas_id = %decoded, "generated example id");
    Ok((
        axum::http::StatusCode::OK,
        Json(GeneratedIdBody {
            decode_aas_id: decoded,
            encode_aas_id: encoded,
        }),
    ))
}
