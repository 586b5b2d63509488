//! API 客户端
//!
//! 负责拼接 URL、注入 JSON 与 Bearer 请求头、解析响应以及统一错误消息。

use serde::de::DeserializeOwned;
use serde_json::Value;
use wms_shared::protocol::{ApiRequest, HttpMethod};
use wms_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::resources::{AuthApi, DashboardApi, ProductsApi, TransactionsApi};
use crate::store::{StorageBackend, TokenStore};

#[cfg(test)]
mod tests;

// =========================================================
// 配置
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

// =========================================================
// 请求选项
// =========================================================

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<String>,
    /// 默认为 true：存在 Token 时附带 Authorization 头
    pub requires_auth: bool,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            body: None,
            requires_auth: true,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }
}

// =========================================================
// ApiClient
// =========================================================

/// 仓储 API 客户端
///
/// 会话通过注入的 `TokenStore` 显式传入，不读取任何全局状态。
#[derive(Debug, Clone)]
pub struct ApiClient<C, B> {
    config: ClientConfig,
    http: C,
    tokens: TokenStore<B>,
}

impl<C: HttpClient, B: StorageBackend> ApiClient<C, B> {
    pub fn new(config: ClientConfig, http: C, tokens: TokenStore<B>) -> Self {
        Self {
            config,
            http,
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn tokens(&self) -> &TokenStore<B> {
        &self.tokens
    }

    // --- Resource façades ---

    pub fn auth(&self) -> AuthApi<'_, C, B> {
        AuthApi::new(self)
    }

    pub fn products(&self) -> ProductsApi<'_, C, B> {
        ProductsApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_, C, B> {
        TransactionsApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_, C, B> {
        DashboardApi::new(self)
    }

    // --- Core ---

    /// 构造最终发出的请求（不发送）
    pub fn build(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut req = HttpRequest::new(&self.config.url(endpoint), options.method)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        for (key, value) in &options.headers {
            req = req.with_header(key, value);
        }

        if options.requires_auth {
            if let Some(token) = self.tokens.get() {
                req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if let Some(body) = options.body {
            req = req.with_body(body);
        }
        req
    }

    /// 发送请求并把 JSON 响应解析为 `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let req = self.build(endpoint, options);
        let method = req.method;
        let url = req.url.clone();
        log::debug!("{} {}", method.as_str(), url);

        let resp = self.http.send(req).await.inspect_err(|e| {
            log::warn!("{} {} failed: {}", method.as_str(), url, e);
        })?;

        if !resp.ok() {
            let err = status_error(&resp);
            log::warn!("{} {} -> {}: {}", method.as_str(), url, resp.status, err);
            return Err(err);
        }

        decode_body(&resp.body)
    }

    /// 发送一个类型化的请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let mut options = RequestOptions::method(R::METHOD);
        options.requires_auth = R::REQUIRES_AUTH;

        if let Some(body) = req.body() {
            let json = serde_json::to_string(body)
                .map_err(|e| ApiError::serialization(e.to_string()))?;
            options.body = Some(json);
        }

        self.request(&req.path(), options).await
    }
}

// =========================================================
// 响应处理
// =========================================================

/// 从错误响应中提取面向用户的消息
///
/// 优先级：`messages.error` > `message` > `HTTP <status>`。空字符串视为缺失。
pub fn error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let pick = |pointer: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.pointer(pointer))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    };

    pick("/messages/error")
        .or_else(|| pick("/message"))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

fn status_error(resp: &HttpResponse) -> ApiError {
    ApiError::status(resp.status, error_message(resp.status, &resp.body))
}

/// 解析成功响应体，空响应体按 `null` 处理
fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::decode(e.to_string()))
}
