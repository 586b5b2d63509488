//! HTTP 传输抽象
//!
//! `ApiClient` 只依赖 `HttpClient` trait，浏览器端用 fetch 实现，测试用 `MockHttpClient`。

use std::collections::HashMap;

use wms_shared::protocol::HttpMethod;

use crate::error::ApiResult;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// 设置请求头，名称不区分大小写，后设置的覆盖先设置的
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(key));
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 按名称（不区分大小写）读取请求头
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 相关的 JS 类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // (URL, (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 网络层直接失败的 URL
    failures: RefCell<HashMap<String, String>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(url, status, &body.to_string());
    }

    pub fn mock_raw(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn mock_network_failure(&self, url: &str, message: &str) {
        self.failures
            .borrow_mut()
            .insert(url.to_string(), message.to_string());
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        if let Some(message) = self.failures.borrow().get(&url) {
            return Err(crate::error::ApiError::network(message.clone()));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&url) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_case_insensitive() {
        let req = HttpRequest::new("http://x", HttpMethod::Get)
            .with_header("Content-Type", "application/json")
            .with_header("content-type", "text/plain");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
    }
}
