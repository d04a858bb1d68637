use crate::error::{AppResult, SourceError};
use crate::models::question::Question;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use tokio::fs;

/// 从 JSON 加载题库（本地路径或 http(s) 地址）
pub async fn load_questions(location: &str) -> AppResult<Vec<Question>> {
    let questions: Vec<Question> = load_json(location).await?;
    tracing::info!("成功加载 {} 个题目: {}", questions.len(), location);
    Ok(questions)
}

/// 加载分类列表（字符串数组）
///
/// 失败时由调用方退回到 [`derive_categories`]
pub async fn load_categories(location: &str) -> AppResult<Vec<String>> {
    let categories: Vec<String> = load_json(location).await?;
    tracing::info!("成功加载 {} 个分类: {}", categories.len(), location);
    Ok(categories)
}

/// 从题目中提取去重后的分类名，按字母升序
pub fn derive_categories(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .map(|q| q.category.name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

async fn load_json<T: DeserializeOwned>(location: &str) -> AppResult<T> {
    let content = if is_remote(location) {
        fetch_remote(location).await?
    } else {
        fs::read_to_string(location)
            .await
            .map_err(|e| SourceError::ReadFailed {
                path: location.to_string(),
                source: e,
            })?
    };

    let value = serde_json::from_str(&content).map_err(|e| SourceError::JsonParseFailed {
        location: location.to_string(),
        source: e,
    })?;
    Ok(value)
}

async fn fetch_remote(url: &str) -> Result<String, SourceError> {
    tracing::debug!("请求远程资源: {}", url);
    let response = reqwest::get(url)
        .await
        .map_err(|e| SourceError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.status().is_success() {
        return Err(SourceError::BadStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response.text().await.map_err(|e| SourceError::RequestFailed {
        url: url.to_string(),
        source: e,
    })
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
