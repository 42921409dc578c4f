//! Read-only client for the public profile data source. One profile request
//! and one listing request per session, no retries.

use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::core::records::{ProfileRecord, RepoRecord};

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_mode(web::RequestMode::Cors);
    let request =
        web::Request::new_with_str_and_init(url, &init).map_err(|e| anyhow!("{:?}", e))?;
    request
        .headers()
        .set("Accept", "application/vnd.github+json")
        .map_err(|e| anyhow!("{:?}", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    let resp: web::Response = resp_value.dyn_into().map_err(|e| anyhow!("{:?}", e))?;
    if !resp.ok() {
        return Err(anyhow!("request failed: HTTP {}", resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow!("response body was not text"))
}

pub async fn fetch_profile(user: &str) -> anyhow::Result<ProfileRecord> {
    let url = format!("https://api.github.com/users/{user}");
    let body = fetch_text(&url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Most recently updated repositories, newest first, capped at `limit`.
pub async fn fetch_recent_repos(user: &str, limit: usize) -> anyhow::Result<Vec<RepoRecord>> {
    let url = format!("https://api.github.com/users/{user}/repos?sort=updated&per_page={limit}");
    let body = fetch_text(&url).await?;
    let mut repos: Vec<RepoRecord> = serde_json::from_str(&body)?;
    repos.truncate(limit);
    Ok(repos)
}
