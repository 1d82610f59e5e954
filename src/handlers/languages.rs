//! Supported language listing

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{
    judge::languages::{EngineLanguageId, Language},
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub id: Language,
    pub engine_id: EngineLanguageId,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::ALL
            .iter()
            .map(|&id| LanguageInfo {
                id,
                engine_id: id.engine_id(),
            })
            .collect(),
    })
}

/// Language routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/languages", get(list_languages))
}
