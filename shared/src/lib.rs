use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存 Bearer Token 的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// LocalStorage 中保存角色的键
pub const STORAGE_ROLE_KEY: &str = "roles";
/// 路由守卫读取的 Cookie 名称
pub const TOKEN_COOKIE: &str = "token";
/// Cookie 有效期（秒），固定 24 小时
pub const TOKEN_COOKIE_MAX_AGE_SECS: u64 = 86_400;

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const ROLE_ADMIN: &str = "admin";

// =========================================================
// 通用响应信封 (Envelopes)
// =========================================================

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// 列表接口的响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Meta,
}

/// 详情 / 创建 / 更新接口的响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// 删除等无实体返回的接口确认体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// 用户角色
///
/// 仅用于界面上的显示控制，真正的鉴权在服务端完成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        if value == ROLE_ADMIN {
            Role::Admin
        } else {
            Role::Other(value.to_string())
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// 登录成功后返回的数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: Profile,
}

// =========================================================
// 商品 (Products)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub minimum_stock: i64,
    #[serde(default)]
    pub shelf_location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// 库存不高于最低库存即视为低库存
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.minimum_stock
    }

    pub fn shelf_location(&self) -> &str {
        self.shelf_location.as_deref().unwrap_or_default()
    }

    /// 按指定字段比较两个商品，字符串字段忽略大小写
    pub fn compare_by(&self, other: &Self, field: ProductSortField) -> Ordering {
        match field {
            ProductSortField::Id => self.id.cmp(&other.id),
            ProductSortField::Stock => self.stock.cmp(&other.stock),
            ProductSortField::Name => cmp_ignore_case(&self.name, &other.name),
            ProductSortField::Sku => cmp_ignore_case(&self.sku, &other.sku),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// 创建商品的请求体（更新时复用同一结构）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_location: Option<String>,
    pub minimum_stock: i64,
}

pub type UpdateProduct = CreateProduct;

impl From<&Product> for CreateProduct {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            sku: p.sku.clone(),
            stock: p.stock,
            shelf_location: p.shelf_location.clone(),
            minimum_stock: p.minimum_stock,
        }
    }
}

/// 商品列表可排序的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortField {
    #[default]
    Id,
    Name,
    Sku,
    Stock,
}

impl ProductSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Sku => "sku",
            Self::Stock => "stock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

// =========================================================
// 出入库流水 (Transactions)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[default]
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "IN" => Some(TransactionType::In),
            "OUT" => Some(TransactionType::Out),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub product_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: i64,
    pub created_at: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_stock: Option<i64>,
}

impl Transaction {
    /// 用于表格展示的时间文本，无法解析时原样返回
    pub fn created_at_display(&self) -> String {
        date::display(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub product_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: i64,
}

// =========================================================
// 仪表盘 (Dashboard)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub low_stock_items: Vec<serde_json::Value>,
    /// 旧版接口直接返回计数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_count: Option<u64>,
    #[serde(default)]
    pub total_transactions: u64,
}

impl DashboardSummary {
    pub fn low_stock_total(&self) -> u64 {
        if self.low_stock_items.is_empty() {
            self.low_stock_count.unwrap_or(0)
        } else {
            self.low_stock_items.len() as u64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 3] = [ChartPeriod::Daily, ChartPeriod::Weekly, ChartPeriod::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardChart {
    pub labels: Vec<String>,
    pub inbound_stock: Vec<i64>,
    pub outbound_stock: Vec<i64>,
}

impl DashboardChart {
    /// 两个序列中的最大值，用于确定图表纵轴
    pub fn peak(&self) -> i64 {
        self.inbound_stock
            .iter()
            .chain(self.outbound_stock.iter())
            .copied()
            .max()
            .unwrap_or(0)
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(stock: i64, minimum_stock: i64) -> Product {
        Product {
            id: 1,
            name: "Bolt".into(),
            sku: "B-1".into(),
            stock,
            minimum_stock,
            shelf_location: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn low_stock_is_inclusive_of_threshold() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(0, 3).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }

    #[test]
    fn role_parses_admin_and_keeps_other_names() {
        let admin: Role = serde_json::from_value(json!("admin")).unwrap();
        assert!(admin.is_admin());

        let staff: Role = serde_json::from_value(json!("staff")).unwrap();
        assert_eq!(staff, Role::Other("staff".into()));
        assert_eq!(serde_json::to_value(&staff).unwrap(), json!("staff"));
    }

    #[test]
    fn transaction_uses_type_field_on_the_wire() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 9,
            "product_id": 3,
            "type": "OUT",
            "quantity": 4,
            "created_at": "2024-05-01 08:30:00",
            "product_name": "Bolt"
        }))
        .unwrap();
        assert_eq!(tx.kind, TransactionType::Out);
        assert_eq!(tx.product_stock, None);

        let body = serde_json::to_value(CreateTransaction {
            product_id: 3,
            kind: TransactionType::In,
            quantity: 2,
        })
        .unwrap();
        assert_eq!(body, json!({ "product_id": 3, "type": "IN", "quantity": 2 }));
    }

    #[test]
    fn list_envelope_reads_camel_case_meta() {
        let resp: ListResponse<Product> = serde_json::from_value(json!({
            "success": true,
            "data": [],
            "meta": { "page": 2, "perPage": 10, "total": 35, "totalPages": 4 }
        }))
        .unwrap();
        assert_eq!(
            resp.meta,
            Meta { page: 2, per_page: 10, total: 35, total_pages: 4 }
        );
    }

    #[test]
    fn summary_counts_low_stock_items() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "totalProducts": 12,
            "lowStockItems": [3, 7],
            "totalTransactions": 40
        }))
        .unwrap();
        assert_eq!(summary.total_products, 12);
        assert_eq!(summary.low_stock_total(), 2);
        assert_eq!(summary.total_transactions, 40);

        let legacy: DashboardSummary = serde_json::from_value(json!({
            "totalProducts": 1,
            "lowStockCount": 5,
            "totalTransactions": 0
        }))
        .unwrap();
        assert_eq!(legacy.low_stock_total(), 5);
    }

    #[test]
    fn compare_by_name_ignores_case() {
        let mut a = product(1, 0);
        a.name = "apple".into();
        let mut b = product(1, 0);
        b.name = "Banana".into();
        assert_eq!(a.compare_by(&b, ProductSortField::Name), Ordering::Less);
        assert_eq!(
            SortOrder::Desc.apply(a.compare_by(&b, ProductSortField::Name)),
            Ordering::Greater
        );
    }

    #[test]
    fn chart_peak_covers_both_series() {
        let chart = DashboardChart {
            labels: vec!["Mon".into(), "Tue".into()],
            inbound_stock: vec![3, 9],
            outbound_stock: vec![12, 0],
        };
        assert_eq!(chart.peak(), 12);
        assert_eq!(DashboardChart::default().peak(), 0);
    }
}
