use crate::{
    Acknowledgement, ChartPeriod, CreateProduct, CreateTransaction, DashboardChart,
    DashboardSummary, DetailResponse, ListResponse, LoginData, Product, ProductSortField,
    Transaction, UpdateProduct,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The JSON body type. Requests without a body use `()`.
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token should be attached.
    const REQUIRES_AUTH: bool = true;

    /// The URL path relative to the API base, including any query string.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Query String
// =========================================================

/// Builds `application/x-www-form-urlencoded` query strings, matching what
/// browsers produce with `URLSearchParams`.
#[derive(Debug, Default, Clone)]
pub struct Query {
    buf: String,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        encode_into(&mut self.buf, key);
        self.buf.push('=');
        encode_into(&mut self.buf, &value.to_string());
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Appends the query to `path`; no `?` when the query is empty.
    pub fn finish(self, path: &str) -> String {
        if self.buf.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.buf)
        }
    }
}

fn encode_into(out: &mut String, s: &str) {
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = DetailResponse<LoginData>;
    type Body = Self;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Product list filters; unset fields are left out of the query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub keyword: Option<String>,
    pub sort: Option<ProductSortField>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ApiRequest for ProductFilters {
    type Response = ListResponse<Product>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        Query::new()
            .push_opt("keyword", self.keyword.as_deref())
            .push_opt("sort", self.sort.map(|s| s.as_str()))
            .push_opt("page", self.page)
            .push_opt("perPage", self.per_page)
            .finish("/products")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetProductRequest {
    pub id: u64,
}

impl ApiRequest for GetProductRequest {
    type Response = DetailResponse<Product>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/products/{}", self.id)
    }
}

impl ApiRequest for CreateProduct {
    type Response = DetailResponse<Product>;
    type Body = Self;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/products".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProductRequest {
    pub id: u64,
    pub data: UpdateProduct,
}

impl ApiRequest for UpdateProductRequest {
    type Response = DetailResponse<Product>;
    type Body = UpdateProduct;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/products/{}", self.id)
    }

    fn body(&self) -> Option<&UpdateProduct> {
        Some(&self.data)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProductRequest {
    pub id: u64,
}

impl ApiRequest for DeleteProductRequest {
    // 204 or a small JSON acknowledgement
    type Response = Option<Acknowledgement>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/products/{}", self.id)
    }
}

/// Transaction list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    pub product_id: Option<u64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ApiRequest for TransactionFilters {
    type Response = ListResponse<Transaction>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        Query::new()
            .push_opt("product_id", self.product_id)
            .push_opt("page", self.page)
            .push_opt("perPage", self.per_page)
            .finish("/transactions")
    }
}

impl ApiRequest for CreateTransaction {
    type Response = DetailResponse<Transaction>;
    type Body = Self;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/transactions".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Dashboard aggregate counters
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRequest;

impl ApiRequest for SummaryRequest {
    type Response = DetailResponse<DashboardSummary>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/dashboard".to_string()
    }
}

/// Inbound/outbound series for one period
#[derive(Debug, Clone, Copy)]
pub struct ChartRequest {
    pub period: ChartPeriod,
}

impl ApiRequest for ChartRequest {
    type Response = DetailResponse<DashboardChart>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        Query::new()
            .push("type", self.period.as_str())
            .finish("/dashboard/transactions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_filters_emit_only_set_fields() {
        assert_eq!(ProductFilters::default().path(), "/products");

        let filters = ProductFilters {
            keyword: Some("steel bolt & nut".into()),
            sort: Some(ProductSortField::Stock),
            page: Some(2),
            per_page: Some(10),
        };
        assert_eq!(
            filters.path(),
            "/products?keyword=steel+bolt+%26+nut&sort=stock&page=2&perPage=10"
        );
    }

    #[test]
    fn chart_request_carries_period_as_type() {
        let req = ChartRequest {
            period: ChartPeriod::Weekly,
        };
        assert_eq!(req.path(), "/dashboard/transactions?type=weekly");
    }

    #[test]
    fn transaction_filters_use_snake_case_product_id() {
        let filters = TransactionFilters {
            product_id: Some(7),
            page: None,
            per_page: Some(5),
        };
        assert_eq!(filters.path(), "/transactions?product_id=7&perPage=5");
    }

    #[test]
    fn query_encodes_non_ascii_as_utf8() {
        let q = Query::new().push("keyword", "café").finish("/p");
        assert_eq!(q, "/p?keyword=caf%C3%A9");
    }

    #[test]
    fn query_percent_encodes_reserved_bytes() {
        let q = Query::new().push("keyword", "a&b=c/d e").finish("/p");
        assert_eq!(q, "/p?keyword=a%26b%3Dc%2Fd+e");
    }

    #[test]
    fn metadata_per_request() {
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert!(!LoginRequest::REQUIRES_AUTH);
        assert!(ProductFilters::REQUIRES_AUTH);
        assert_eq!(UpdateProductRequest::METHOD, HttpMethod::Patch);
        assert_eq!(DeleteProductRequest { id: 4 }.path(), "/products/4");
    }
}
