//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号在状态变化时重新守卫当前页面。

use leptos::prelude::*;
use wms_client::{ApiClient, ApiResult, ClientConfig, Session, TokenStore, cookie};

use crate::config::AppConfig;
use crate::web::{BrowserStorage, FetchHttpClient};

/// 浏览器端使用的 API 客户端
pub type WmsApi = ApiClient<FetchHttpClient, BrowserStorage>;

pub fn build_api(config: &AppConfig) -> WmsApi {
    ApiClient::new(
        ClientConfig::new(config.api_base_url.clone()),
        FetchHttpClient,
        TokenStore::new(BrowserStorage).with_cookie_max_age(config.cookie_max_age_secs),
    )
}

/// 认证状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// 当前会话（未登录时为 None）
    pub session: Option<Session>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// 仅用于界面显示控制
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    pub fn role_label(&self) -> String {
        self.session
            .as_ref()
            .map(|s| s.role.to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "user".to_string())
    }
}

/// 认证上下文
///
/// 包含读写信号与 API 客户端，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
    api: StoredValue<WmsApi>,
}

impl AuthContext {
    pub fn new(api: WmsApi) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            api: StoredValue::new(api),
        }
    }

    /// API 客户端（会话由其内部的 `TokenStore` 提供）
    pub fn api(&self) -> WmsApi {
        self.api.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }

    pub fn is_admin_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_admin))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 恢复会话。Cookie 已过期时视为未登录，并清除残留的 Token 与角色，
/// 保证界面状态与路由守卫看到的一致。
pub fn init_auth(ctx: &AuthContext) {
    let api = ctx.api();
    let tokens = api.tokens();

    let session = match tokens.session() {
        Some(session) if cookie::has_session(&tokens.cookie_header()) => Some(session),
        Some(_) => {
            log::info!("session cookie expired, clearing stored token");
            tokens.end();
            None
        }
        None => None,
    };

    ctx.set_state.set(AuthState { session });
}

/// 登录：校验凭据并持久化 Token、角色与 Cookie
///
/// 不修改认证状态。调用方在提示完成后调用 `complete_login`，
/// 路由服务随即把用户带离登录页。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> ApiResult<Session> {
    let api = ctx.api();
    api.auth().sign_in(&email, &password).await
}

pub fn complete_login(ctx: &AuthContext, session: Session) {
    ctx.set_state.set(AuthState {
        session: Some(session),
    });
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.api().auth().sign_out();
    ctx.set_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_shared::Role;

    #[test]
    fn admin_flag_follows_the_session_role() {
        let anonymous = AuthState::default();
        assert!(!anonymous.is_authenticated());
        assert!(!anonymous.is_admin());

        let staff = AuthState {
            session: Some(Session::new("t", Role::from("staff"))),
        };
        assert!(staff.is_authenticated());
        assert!(!staff.is_admin());
        assert_eq!(staff.role_label(), "staff");

        let admin = AuthState {
            session: Some(Session::new("t", Role::Admin)),
        };
        assert!(admin.is_admin());
    }

    #[test]
    fn missing_role_is_labelled_generically() {
        let state = AuthState {
            session: Some(Session::new("t", Role::Other(String::new()))),
        };
        assert_eq!(state.role_label(), "user");
    }
}
