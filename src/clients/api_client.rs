/// 后端 REST API 客户端
///
/// 封装所有与后端的 HTTP 交互：JSON 请求 / 响应，管理端接口带 bearer token。
/// 不做重试、退避或请求去重。
use crate::clients::resource::Resource;
use crate::config::Config;
use crate::error::{ApiError, AppResult, AuthError};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// 后端客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::MissingBaseUrl.into());
        }

        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder.build().map_err(|source| ApiError::RequestFailed {
            endpoint: base_url.clone(),
            source,
        })?;

        Ok(Self {
            http,
            base_url,
            token: config.api_token.clone(),
        })
    }

    /// 替换 bearer token（登录 / 登出后）
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拉取资源列表
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> AppResult<Vec<T>> {
        let endpoint = resource.path().to_string();
        let value = self.send(Method::GET, resource, &endpoint, None::<&()>).await?;
        parse_list(&endpoint, value)
    }

    /// 拉取单条资源
    pub async fn get<T: DeserializeOwned>(&self, resource: Resource, id: &str) -> AppResult<T> {
        let endpoint = format!("{}/{}", resource.path(), id);
        let value = self.send(Method::GET, resource, &endpoint, None::<&()>).await?;
        parse_item(&endpoint, value)
    }

    /// 按 slug 拉取（例如 `exams/aws/saa-c03`）
    pub async fn get_by_slug<T: DeserializeOwned>(&self, resource: Resource, slug: &str) -> AppResult<T> {
        self.get(resource, slug.trim_matches('/')).await
    }

    /// 新建资源
    pub async fn create<B: Serialize, T: DeserializeOwned>(&self, resource: Resource, body: &B) -> AppResult<T> {
        let endpoint = resource.path().to_string();
        let value = self.send(Method::POST, resource, &endpoint, Some(body)).await?;
        parse_item(&endpoint, value)
    }

    /// 更新资源
    pub async fn update<B: Serialize, T: DeserializeOwned>(&self, resource: Resource, id: &str, body: &B) -> AppResult<T> {
        let endpoint = format!("{}/{}", resource.path(), id);
        let value = self.send(Method::PUT, resource, &endpoint, Some(body)).await?;
        parse_item(&endpoint, value)
    }

    /// 删除资源
    pub async fn delete(&self, resource: Resource, id: &str) -> AppResult<()> {
        let endpoint = format!("{}/{}", resource.path(), id);
        self.send(Method::DELETE, resource, &endpoint, None::<&()>).await?;
        Ok(())
    }

    /// 发送请求并检查状态码；token 只发给管理端资源
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        resource: Resource,
        endpoint: &str,
        body: Option<&B>,
    ) -> AppResult<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut request: RequestBuilder = self
            .http
            .request(method, &url)
            .header("Accept", "application/json, text/plain, */*");
        if let Some(token) = self.token.as_ref().filter(|_| resource.admin_scoped()) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            source,
        })?;

        check_status(endpoint, status, &text)?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| {
            ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            }
            .into()
        })
    }
}

/// 401 / 403 归为鉴权失败，其余非 2xx 为错误响应
fn check_status(endpoint: &str, status: StatusCode, body: &str) -> AppResult<()> {
    if status.is_success() {
        return Ok(());
    }

    warn!("接口 {} 返回状态码 {}", endpoint, status);
    match status {
        StatusCode::UNAUTHORIZED => Err(AuthError::Unauthorized {
            endpoint: endpoint.to_string(),
        }
        .into()),
        StatusCode::FORBIDDEN => Err(AuthError::Forbidden {
            endpoint: endpoint.to_string(),
        }
        .into()),
        _ => Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: extract_message(body),
        }
        .into()),
    }
}

/// 从错误响应体中提取 `message` / `error` 字段
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// 响应可能是裸数组，也可能包在 `{ "data": [...] }` 里
fn parse_list<T: DeserializeOwned>(endpoint: &str, value: Value) -> AppResult<Vec<T>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(data) => data,
        },
        other => other,
    };
    serde_json::from_value(items).map_err(|source| {
        ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        }
        .into()
    })
}

fn parse_item<T: DeserializeOwned>(endpoint: &str, value: Value) -> AppResult<T> {
    let item = match value {
        Value::Object(ref map) if map.get("data").is_some_and(|d| d.is_object()) => {
            map.get("data").cloned().unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(item).map_err(|source| {
        ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        }
        .into()
    })
}
