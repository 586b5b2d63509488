//! 仓储管理面板的 API 边界层
//!
//! - `store`: Token / 角色持久化与 Cookie 镜像
//! - `http`: 传输抽象
//! - `api`: 请求构造、鉴权头注入、错误归一化
//! - `resources`: 按资源划分的类型化门面
//! - `guard`: 基于 Cookie 的路由守卫
//! - `sequence`: 丢弃过期响应

pub mod api;
pub mod cookie;
pub mod error;
pub mod guard;
pub mod http;
pub mod resources;
pub mod sequence;
pub mod store;

pub use api::{ApiClient, ClientConfig, RequestOptions};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use guard::{GuardDecision, RouteGuard};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use sequence::{RequestSequencer, Ticket};
pub use store::{MemoryStorage, NullStorage, Session, StorageBackend, TokenStore};
