//! 浏览器 HTTP 传输
//!
//! 基于 `gloo-net`（fetch）实现 `wms_client::HttpClient`。

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};
use wms_client::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};
use wms_shared::protocol::HttpMethod;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// fetch 传输层（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(format!("请求构建失败: {}", e)))?;

        // 只有请求没能到达服务端时才会失败（断网、CORS 等）
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
