//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，守卫只读取 `token` Cookie。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wms_client::{RouteGuard, StorageBackend};

use super::route::{AppRoute, Resolved, resolve};
use super::storage::BrowserStorage;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn set_document_title(route: AppRoute) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(&format!("{} | WMS", route.title()));
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证状态以信号形式注入，只用来触发重新守卫；是否放行仍由 Cookie 决定。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    guard: RouteGuard,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let guard = RouteGuard::default();

        // 初始加载同样经过守卫
        let path = current_path();
        let Resolved { route, redirected } = resolve(&guard, &path, &BrowserStorage.cookie_header());
        if redirected {
            log::info!("[Router] {} -> {}", path, route);
            replace_history_state(&route.to_path());
        }
        set_document_title(route);
        let (current_route, set_route) = signal(route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            guard,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 对路径执行守卫
    fn guarded(&self, path: &str) -> Resolved {
        let resolved = resolve(&self.guard, path, &BrowserStorage.cookie_header());
        if resolved.redirected {
            log::info!("[Router] {} -> {}", path, resolved.route);
        }
        resolved
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let Resolved { route, .. } = self.guarded(path);
        push_history_state(&route.to_path());
        self.load(route);
    }

    fn load(&self, route: AppRoute) {
        set_document_title(route);
        self.set_route.set(route);
    }

    /// 浏览器后退/前进按钮同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let Resolved { route, redirected } = router.guarded(&current_path());
            if redirected {
                replace_history_state(&route.to_path());
            }
            router.load(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化（登录 / 注销）时重新守卫当前页面
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let current = router.current_route.get_untracked();

            let Resolved { route, redirected } = router.guarded(&current.to_path());
            if redirected {
                log::info!(
                    "[Router] auth state changed (authenticated: {}), redirecting to {}",
                    is_auth,
                    route
                );
                push_history_state(&route.to_path());
                router.load(route);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，改走路由服务
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(into, default = Signal::stored(String::new()))] class: Signal<String>,
    #[prop(optional)] on_navigate: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
        if let Some(cb) = on_navigate {
            cb.run(());
        }
    };

    view! {
        <a href=to class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
