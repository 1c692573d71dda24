//! Thin client over the logbook REST API.
//!
//! Every call resolves to `Result<_, ApiError>`; components turn the error into
//! their alert banner. Nothing here retries or times out.

use common::api::ApiError;
use common::model::entry::LogbookEntry;
use common::model::template::{Template, TemplateDraft, TemplateFilter};
use common::requests::{EntryPayload, EntryQuery, ReviewUpdate};
use gloo_console::log;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;

const TEMPLATES_PATH: &str = "/api/log-book-template";
const ENTRIES_PATH: &str = "/api/log-books";

async fn read_json<T: DeserializeOwned>(action: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response_body(action, status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::decode(action, e))
}

/// First template matching `filter`, if any.
pub async fn fetch_templates(
    config: &AppConfig,
    filter: &TemplateFilter,
) -> Result<Option<Template>, ApiError> {
    let action = "loading template";
    log!("GET", TEMPLATES_PATH, format!("{:?}", filter));
    let response = Request::get(&config.url(TEMPLATES_PATH))
        .query(filter.query_pairs())
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    let templates: Vec<Template> = read_json(action, response).await?;
    Ok(templates.into_iter().next())
}

pub async fn fetch_template(config: &AppConfig, id: &str) -> Result<Template, ApiError> {
    let action = "loading template";
    let response = Request::get(&config.url(&format!("{}/{}", TEMPLATES_PATH, id)))
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}

/// POSTs a new template, PATCHes an existing one.
pub async fn save_template(config: &AppConfig, draft: &TemplateDraft) -> Result<Template, ApiError> {
    let action = "saving template";
    let url = config.url(TEMPLATES_PATH);
    let request = if draft.is_new() {
        Request::post(&url)
    } else {
        Request::patch(&url)
    };
    let response = request
        .json(draft)
        .map_err(|e| ApiError::transport(action, e))?
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}

pub async fn fetch_entries(
    config: &AppConfig,
    query: &EntryQuery,
) -> Result<Vec<LogbookEntry>, ApiError> {
    let action = "loading entries";
    log!("GET", ENTRIES_PATH, query.student_id.as_str());
    let response = Request::get(&config.url(ENTRIES_PATH))
        .query(query.query_pairs())
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}

pub async fn create_entry(
    config: &AppConfig,
    payload: &EntryPayload,
) -> Result<LogbookEntry, ApiError> {
    let action = "saving entry";
    let response = Request::post(&config.url(ENTRIES_PATH))
        .json(payload)
        .map_err(|e| ApiError::transport(action, e))?
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}

pub async fn update_entry(
    config: &AppConfig,
    id: &str,
    payload: &EntryPayload,
) -> Result<LogbookEntry, ApiError> {
    let action = "saving entry";
    let response = Request::put(&config.url(&format!("{}/{}", ENTRIES_PATH, id)))
        .json(payload)
        .map_err(|e| ApiError::transport(action, e))?
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}

/// Teacher decision on a submitted entry.
pub async fn review_entry(
    config: &AppConfig,
    id: &str,
    update: &ReviewUpdate,
) -> Result<LogbookEntry, ApiError> {
    let action = "reviewing entry";
    let response = Request::put(&config.url(&format!("{}/{}", ENTRIES_PATH, id)))
        .json(update)
        .map_err(|e| ApiError::transport(action, e))?
        .send()
        .await
        .map_err(|e| ApiError::transport(action, e))?;
    read_json(action, response).await
}
