//! 路由守卫
//!
//! 纯函数：只看请求路径和 `token` Cookie 是否存在，不校验 Token 本身。

use crate::cookie;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";
pub const PROTECTED_PREFIXES: [&str; 3] = ["/dashboard", "/products", "/transactions"];

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行
    Pass,
    /// 重定向到指定路径
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct RouteGuard {
    protected: &'static [&'static str],
    login_path: &'static str,
    home_path: &'static str,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected: &PROTECTED_PREFIXES,
            login_path: LOGIN_PATH,
            home_path: HOME_PATH,
        }
    }
}

impl RouteGuard {
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| path.starts_with(prefix))
    }

    pub fn is_login(&self, path: &str) -> bool {
        path.starts_with(self.login_path)
    }

    /// **核心守卫逻辑**
    ///
    /// - 受保护路径且无 Cookie -> 登录页
    /// - 登录页且有 Cookie -> 面板
    /// - 其它 -> 放行
    pub fn check(&self, path: &str, cookie_header: &str) -> GuardDecision {
        let has_token = cookie::has_session(cookie_header);

        if self.is_protected(path) && !has_token {
            return GuardDecision::Redirect(self.login_path);
        }
        if self.is_login(path) && has_token {
            return GuardDecision::Redirect(self.home_path);
        }
        GuardDecision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStorage, Session, TokenStore};
    use wms_shared::Role;

    #[test]
    fn protected_path_without_cookie_goes_to_login() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/products", ""), GuardDecision::Redirect("/login"));
        assert_eq!(guard.check("/products/12", "theme=dark"), GuardDecision::Redirect("/login"));
        assert_eq!(guard.check("/transactions", "token="), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn login_with_cookie_goes_to_dashboard() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/login", "token=abc"), GuardDecision::Redirect("/dashboard"));
        assert_eq!(guard.check("/login", ""), GuardDecision::Pass);
    }

    #[test]
    fn authenticated_protected_path_passes() {
        let guard = RouteGuard::default();
        assert_eq!(guard.check("/dashboard", "token=abc"), GuardDecision::Pass);
        assert_eq!(guard.check("/about", ""), GuardDecision::Pass);
    }

    #[test]
    fn logout_makes_the_next_check_redirect() {
        let storage = MemoryStorage::new();
        let store = TokenStore::new(storage.clone());
        let guard = RouteGuard::default();

        store.begin(&Session::new("abc", Role::Admin));
        assert_eq!(guard.check("/dashboard", &store.cookie_header()), GuardDecision::Pass);

        store.end();
        assert_eq!(
            guard.check("/dashboard", &store.cookie_header()),
            GuardDecision::Redirect("/login")
        );
    }
}
