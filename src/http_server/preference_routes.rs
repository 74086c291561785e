//! Preference HTTP Routes
//!
//! Endpoints for reading and changing the theme preference.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::preferences::Theme;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme: Theme,
    pub is_dark: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
        }
    }
}

/// Either `{"theme": "dark"}` or `{"isDark": true}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetThemeRequest {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub is_dark: Option<bool>,
}

impl SetThemeRequest {
    fn resolve(self) -> ApiResult<Theme> {
        match (self.theme, self.is_dark) {
            (Some(name), _) => Ok(name.parse()?),
            (None, Some(dark)) => Ok(Theme::from_dark(dark)),
            (None, None) => Err(ApiError::InvalidRequest(
                "expected \"theme\" or \"isDark\"".to_string(),
            )),
        }
    }
}

/// Create preference routes
pub fn preference_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/preferences/theme",
            get(get_theme_handler).put(set_theme_handler),
        )
        .route("/preferences/theme/toggle", post(toggle_theme_handler))
        .with_state(state)
}

async fn get_theme_handler(State(state): State<Arc<AppState>>) -> Json<ThemeResponse> {
    Json(state.theme.get().into())
}

async fn set_theme_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SetThemeRequest>, JsonRejection>,
) -> ApiResult<Json<ThemeResponse>> {
    let Json(request) = payload.map_err(|r| ApiError::InvalidRequest(r.body_text()))?;
    let theme = state.theme.set(request.resolve()?)?;
    Ok(Json(theme.into()))
}

async fn toggle_theme_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ThemeResponse>> {
    let theme = state.theme.toggle()?;
    Ok(Json(theme.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        let request = SetThemeRequest {
            theme: Some("dark".to_string()),
            is_dark: None,
        };
        assert_eq!(request.resolve().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_resolve_by_flag() {
        let request = SetThemeRequest {
            theme: None,
            is_dark: Some(false),
        };
        assert_eq!(request.resolve().unwrap(), Theme::Light);
    }

    #[test]
    fn test_resolve_requires_field() {
        let request = SetThemeRequest {
            theme: None,
            is_dark: None,
        };
        assert!(request.resolve().is_err());
    }

    #[test]
    fn test_theme_response_serialization() {
        let json = serde_json::to_value(ThemeResponse::from(Theme::Dark)).unwrap();
        assert_eq!(json, serde_json::json!({"theme": "dark", "isDark": true}));
    }
}
