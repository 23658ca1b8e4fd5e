use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::history::NavigationHistory;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub page: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationResponse {
    pub page: String,
    pub history: Vec<String>,
}

impl NavigationResponse {
    fn from_history(history: &NavigationHistory) -> Self {
        Self {
            page: history.current().to_string(),
            history: history.pages().to_vec(),
        }
    }
}

fn with_history<T>(
    navigation: &Mutex<NavigationHistory>,
    f: impl FnOnce(&mut NavigationHistory) -> T,
) -> AppResult<T> {
    let mut history = navigation
        .lock()
        .map_err(|_| AppError::InternalError("Navigation history lock poisoned".to_string()))?;
    Ok(f(&mut history))
}

pub fn navigate_to(request: NavigateRequest, navigation: &Mutex<NavigationHistory>) -> AppResult<NavigationResponse> {
    Validator::validate_page(&request.page)?;
    with_history(navigation, |history| {
        history.navigate_to(&request.page);
        NavigationResponse::from_history(history)
    })
}

pub fn go_back(navigation: &Mutex<NavigationHistory>) -> AppResult<NavigationResponse> {
    with_history(navigation, |history| {
        history.go_back();
        NavigationResponse::from_history(history)
    })
}

pub fn go_home(navigation: &Mutex<NavigationHistory>) -> AppResult<NavigationResponse> {
    with_history(navigation, |history| {
        history.go_home();
        NavigationResponse::from_history(history)
    })
}

pub fn get_navigation_history(navigation: &Mutex<NavigationHistory>) -> AppResult<NavigationResponse> {
    with_history(navigation, |history| NavigationResponse::from_history(history))
}
