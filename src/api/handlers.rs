use crate::models::{FieldError, MatchStats, ScoredMechanic, ServiceRequest, StoredRequest};
use crate::service::{MatcherService, RequestStore};
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 共享状态: 匹配服务 + 请求收件箱
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<MatcherService>,
    pub store: Arc<RequestStore>,
}

/// 提交响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
    pub matches: Vec<ScoredMechanic>,
    pub stats: MatchStats,
}

/// 校验失败响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct RejectedResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// 收件箱列表条目 (只带预览, 不带全文)
#[derive(Debug, Serialize, Deserialize)]
pub struct InboxEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub county: String,
    pub category: String,
    pub preview: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InboxResponse {
    pub success: bool,
    pub count: usize,
    pub requests: Vec<InboxEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestDetailResponse {
    pub success: bool,
    pub message: String,
    pub request: Option<StoredRequest>,
}

/// 收件箱列表上限
const INBOX_LIMIT: usize = 50;

/// 描述预览长度
const PREVIEW_CHARS: usize = 90;

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 提交维修请求: 校验 -> 入收件箱 -> 对roster排名 -> 返回 top-N
pub async fn submit_request(
    State(state): State<AppState>,
    Json(request): Json<ServiceRequest>,
) -> Response {
    let errors = request.validate();
    if !errors.is_empty() {
        let plural = if errors.len() == 1 { "" } else { "s" };
        let response = RejectedResponse {
            success: false,
            message: format!("Please fix {} field{} before continuing.", errors.len(), plural),
            errors,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response();
    }

    let stored = StoredRequest::assign(request);
    state.store.insert(stored.clone());

    let (matches, stats) = state.matcher.match_request(&stored.request);

    let message = if matches.is_empty() {
        "No matches found".to_string()
    } else {
        format!("Matched {} mechanics", matches.len())
    };

    let response = SubmitResponse {
        success: true,
        message,
        request_id: stored.id,
        matches,
        stats,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 收件箱列表, 最新在前, 最多 50 条
pub async fn list_requests(State(state): State<AppState>) -> Response {
    let requests: Vec<InboxEntry> = state
        .store
        .list_recent(INBOX_LIMIT)
        .into_iter()
        .map(|stored| InboxEntry {
            preview: stored.preview(PREVIEW_CHARS),
            county: stored.request.location.county.clone(),
            category: stored.request.category.clone(),
            created_at: stored.created_at,
            id: stored.id,
        })
        .collect();

    let response = InboxResponse {
        success: true,
        count: requests.len(),
        requests,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 单条请求详情
pub async fn get_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(stored) => {
            let response = RequestDetailResponse {
                success: true,
                message: "OK".to_string(),
                request: Some(stored),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        None => {
            let response = RequestDetailResponse {
                success: false,
                message: format!("Request {} not found", id),
                request: None,
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
    }
}

/// 请求的纯文本版本 (对应原"复制请求"功能)
pub async fn get_request_text(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(stored) => (StatusCode::OK, stored.to_text()).into_response(),
        None => (StatusCode::NOT_FOUND, format!("Request {} not found", id)).into_response(),
    }
}

/// 收件箱 CSV 导出
pub async fn export_requests(State(state): State<AppState>) -> Response {
    match state.store.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            csv,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            let response = RejectedResponse {
                success: false,
                message: format!("Error: {}", e),
                errors: vec![],
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
