//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 访问控制交给 `wms_client::RouteGuard`，这里只负责路径与页面之间的映射。

use std::fmt::Display;

use wms_client::{GuardDecision, RouteGuard};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    /// 控制面板（根路径也落在这里）
    #[default]
    Dashboard,
    Products,
    ProductDetail(u64),
    Transactions,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串与末尾的 `/`）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" | "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/products" => Self::Products,
            "/transactions" => Self::Transactions,
            _ => match path.strip_prefix("/products/") {
                Some(id) => id.parse().map_or(Self::NotFound, Self::ProductDetail),
                None => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Products => "/products".to_string(),
            Self::ProductDetail(id) => format!("/products/{}", id),
            Self::Transactions => "/transactions".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 是否渲染在侧边栏布局内
    pub fn uses_layout(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 浏览器标签页标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::ProductDetail(_) => "Product Detail",
            Self::Transactions => "Transactions",
            Self::NotFound => "Not Found",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 路由解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub route: AppRoute,
    /// 守卫把请求改写到了别处
    pub redirected: bool,
}

/// **核心守卫逻辑：路径 -> 守卫 -> 最终路由**
///
/// 原始路径（去掉查询串与片段）与规范化后的路径都要经过守卫：
/// 前者覆盖 `/products/abc` 这类解析不出的受保护子路径，后者让 `/` 与 `/dashboard` 受同样的保护。
pub fn resolve(guard: &RouteGuard, path: &str, cookie_header: &str) -> Resolved {
    let raw = path.split(['?', '#']).next().unwrap_or_default();
    let route = AppRoute::from_path(path);

    let decision = match guard.check(raw, cookie_header) {
        GuardDecision::Pass => guard.check(&route.to_path(), cookie_header),
        redirect => redirect,
    };

    match decision {
        GuardDecision::Pass => Resolved {
            route,
            redirected: false,
        },
        GuardDecision::Redirect(target) => Resolved {
            route: AppRoute::from_path(target),
            redirected: true,
        },
    }
}

/// 侧边栏高亮：当前路径以菜单路径为前缀
pub fn is_active(current: &AppRoute, href: &str) -> bool {
    current.to_path().starts_with(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/products/"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/products/42"), AppRoute::ProductDetail(42));
        assert_eq!(AppRoute::from_path("/transactions?page=2"), AppRoute::Transactions);
        assert_eq!(AppRoute::from_path("/products/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip_through_the_parser() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Products,
            AppRoute::ProductDetail(7),
            AppRoute::Transactions,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn root_is_guarded_like_the_dashboard() {
        let guard = RouteGuard::default();
        let resolved = resolve(&guard, "/", "");
        assert_eq!(resolved.route, AppRoute::Login);
        assert!(resolved.redirected);
    }

    #[test]
    fn detail_pages_require_a_session() {
        let guard = RouteGuard::default();
        assert_eq!(resolve(&guard, "/products/3", "").route, AppRoute::Login);
        assert_eq!(
            resolve(&guard, "/products/3", "token=t").route,
            AppRoute::ProductDetail(3)
        );
    }

    #[test]
    fn unparseable_protected_paths_require_a_session() {
        let guard = RouteGuard::default();
        for path in ["/products/abc", "/products/new", "/dashboard/x", "/transactions/1?page=2"] {
            let resolved = resolve(&guard, path, "");
            assert_eq!(resolved.route, AppRoute::Login, "{}", path);
            assert!(resolved.redirected, "{}", path);
        }

        // 有会话时仍按路径解析，落到 404
        assert_eq!(
            resolve(&guard, "/products/abc", "token=t"),
            Resolved {
                route: AppRoute::NotFound,
                redirected: false
            }
        );
    }

    #[test]
    fn login_with_session_lands_on_dashboard() {
        let guard = RouteGuard::default();
        let resolved = resolve(&guard, "/login", "theme=dark; token=t");
        assert_eq!(resolved.route, AppRoute::Dashboard);
        assert!(resolved.redirected);
    }

    #[test]
    fn unknown_paths_pass_through() {
        let guard = RouteGuard::default();
        assert_eq!(
            resolve(&guard, "/nowhere", ""),
            Resolved {
                route: AppRoute::NotFound,
                redirected: false
            }
        );
    }

    #[test]
    fn sidebar_highlight_uses_prefix() {
        assert!(is_active(&AppRoute::ProductDetail(9), "/products"));
        assert!(!is_active(&AppRoute::Transactions, "/products"));
    }
}
