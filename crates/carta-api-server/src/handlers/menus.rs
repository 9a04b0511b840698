//! Menu save/read HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::database::MenuStore;
use crate::models::{collect_violations, CartaDocument, MenuUpload};
use crate::services::MenuService;
use crate::utils::error::ApiError;

const NO_MENU_MESSAGE: &str = "No hay carta guardada para este bar";

#[derive(Debug, Deserialize)]
pub struct GuardarParams {
    #[serde(rename = "barId")]
    pub bar_id: i32,
}

#[derive(Debug, Serialize)]
pub struct GuardarResponse {
    pub ok: bool,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MenuFoundResponse {
    pub ok: bool,
    pub menu: CartaDocument,
}

#[derive(Debug, Serialize)]
pub struct MenuMissingResponse {
    pub ok: bool,
    pub mensaje: String,
}

/// POST /menus/guardar?barId=<int>
///
/// Structural rejections (unparsable body, bad barId) and schema violations
/// both answer 422 with itemized `detalles`; nothing is persisted on
/// rejection.
pub async fn guardar_menu_handler<S: MenuStore + 'static>(
    Extension(service): Extension<Arc<MenuService<S>>>,
    params: Result<Query<GuardarParams>, QueryRejection>,
    payload: Result<Json<MenuUpload>, JsonRejection>,
) -> Result<Json<GuardarResponse>, ApiError> {
    let Query(params) = params
        .map_err(|rejection| ApiError::validation_detail("barId", &rejection.body_text()))?;

    let Json(menu) = payload
        .map_err(|rejection| ApiError::validation_detail("body", &rejection.body_text()))?;

    menu.validate()
        .map_err(|errors| ApiError::Validation(collect_violations(&errors)))?;

    info!(
        "Saving menu for bar {} ({} categorias)",
        params.bar_id,
        menu.categorias.len()
    );

    let id = service.save(params.bar_id, menu).await?;
    Ok(Json(GuardarResponse { ok: true, id }))
}

/// GET /menus/{barId}
///
/// A bar without a stored menu is a 200 with `ok: false`, not an HTTP
/// failure.
pub async fn obtener_menu_handler<S: MenuStore + 'static>(
    Extension(service): Extension<Arc<MenuService<S>>>,
    bar_id: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(bar_id) = bar_id
        .map_err(|rejection| ApiError::validation_detail("barId", &rejection.body_text()))?;

    match service.latest(bar_id).await? {
        Some(menu) => Ok(Json(MenuFoundResponse { ok: true, menu }).into_response()),
        None => Ok(Json(MenuMissingResponse {
            ok: false,
            mensaje: NO_MENU_MESSAGE.to_string(),
        })
        .into_response()),
    }
}
