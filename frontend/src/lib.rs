//! 仓库管理后台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `config`: 编译期配置
//! - `components`: UI 组件层

mod auth;
mod config;
mod components {
    pub mod common;
    pub mod dashboard;
    pub mod layout;
    pub mod login;
    pub mod product_detail;
    pub mod product_form;
    pub mod products;
    pub mod transactions;
}

use crate::auth::{AuthContext, build_api, init_auth};
use crate::components::common::{ToastContext, ToastHost};
use crate::components::dashboard::DashboardPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::product_detail::ProductDetailPage;
use crate::components::products::ProductsPage;
use crate::components::transactions::TransactionsPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 浏览器 API 封装模块
// HTTP 走 gloo-net，存储直接读写 localStorage 与 document.cookie。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

fn page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::Transactions => view! { <TransactionsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，受保护页面外层套上侧边栏布局。
fn route_matcher(route: AppRoute) -> AnyView {
    if route.uses_layout() {
        view! { <Layout>{page(route)}</Layout> }.into_any()
    } else {
        page(route)
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::debug!("api base url: {}", config.api_base_url);

    // 1. 创建认证上下文（持有 API 客户端）
    let auth_ctx = AuthContext::new(build_api(&config));
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 与 Cookie 恢复会话
    init_auth(&auth_ctx);

    // 3. 全局通知，跨页面保留
    provide_context(ToastContext::new(config.toast_duration_ms));
    provide_context(config);

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
