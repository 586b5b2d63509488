//! 资源客户端
//!
//! 每个服务端资源一个轻量门面，把语义化操作映射为一次 `ApiClient::send`。

use wms_shared::protocol::{
    ChartRequest, DeleteProductRequest, GetProductRequest, LoginRequest, ProductFilters,
    SummaryRequest, TransactionFilters, UpdateProductRequest,
};
use wms_shared::{
    Acknowledgement, ChartPeriod, CreateProduct, CreateTransaction, DashboardChart,
    DashboardSummary, DetailResponse, ListResponse, LoginData, Product, Transaction,
    UpdateProduct,
};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::store::{Session, StorageBackend};

// =========================================================
// Auth
// =========================================================

pub struct AuthApi<'a, C, B> {
    client: &'a ApiClient<C, B>,
}

impl<'a, C: HttpClient, B: StorageBackend> AuthApi<'a, C, B> {
    pub(crate) fn new(client: &'a ApiClient<C, B>) -> Self {
        Self { client }
    }

    /// 登录（不附带 Authorization 头）
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<DetailResponse<LoginData>> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.send(&req).await
    }

    /// 登录并开启会话：保存 Token、角色并写入 Cookie
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let resp = self.login(email, password).await?;
        let session = Session::from(resp.data);
        self.client.tokens().begin(&session);
        log::info!("signed in as {}", session.role);
        Ok(session)
    }

    /// 注销：清除 Token、角色与 Cookie
    pub fn sign_out(&self) {
        self.client.tokens().end();
        log::info!("signed out");
    }
}

// =========================================================
// Products
// =========================================================

pub struct ProductsApi<'a, C, B> {
    client: &'a ApiClient<C, B>,
}

impl<'a, C: HttpClient, B: StorageBackend> ProductsApi<'a, C, B> {
    pub(crate) fn new(client: &'a ApiClient<C, B>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &ProductFilters) -> ApiResult<ListResponse<Product>> {
        self.client.send(filters).await
    }

    pub async fn get_by_id(&self, id: u64) -> ApiResult<DetailResponse<Product>> {
        self.client.send(&GetProductRequest { id }).await
    }

    pub async fn create(&self, data: &CreateProduct) -> ApiResult<DetailResponse<Product>> {
        self.client.send(data).await
    }

    pub async fn update(&self, id: u64, data: UpdateProduct) -> ApiResult<DetailResponse<Product>> {
        self.client.send(&UpdateProductRequest { id, data }).await
    }

    pub async fn delete(&self, id: u64) -> ApiResult<Option<Acknowledgement>> {
        self.client.send(&DeleteProductRequest { id }).await
    }
}

// =========================================================
// Transactions
// =========================================================

pub struct TransactionsApi<'a, C, B> {
    client: &'a ApiClient<C, B>,
}

impl<'a, C: HttpClient, B: StorageBackend> TransactionsApi<'a, C, B> {
    pub(crate) fn new(client: &'a ApiClient<C, B>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &TransactionFilters) -> ApiResult<ListResponse<Transaction>> {
        self.client.send(filters).await
    }

    pub async fn create(&self, data: &CreateTransaction) -> ApiResult<DetailResponse<Transaction>> {
        self.client.send(data).await
    }
}

// =========================================================
// Dashboard
// =========================================================

pub struct DashboardApi<'a, C, B> {
    client: &'a ApiClient<C, B>,
}

impl<'a, C: HttpClient, B: StorageBackend> DashboardApi<'a, C, B> {
    pub(crate) fn new(client: &'a ApiClient<C, B>) -> Self {
        Self { client }
    }

    pub async fn get_summary(&self) -> ApiResult<DetailResponse<DashboardSummary>> {
        self.client.send(&SummaryRequest).await
    }

    pub async fn get_chart(&self, period: ChartPeriod) -> ApiResult<DetailResponse<DashboardChart>> {
        self.client.send(&ChartRequest { period }).await
    }
}
