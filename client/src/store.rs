//! 会话存储模块
//!
//! `TokenStore` 负责 Token 与角色的持久化，以及 `token` Cookie 的镜像。
//! 具体的存储介质由 `StorageBackend` 提供：浏览器端是 LocalStorage + `document.cookie`，
//! 测试与非浏览器环境用 `MemoryStorage`。

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use wms_shared::{LoginData, Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, TOKEN_COOKIE_MAX_AGE_SECS};

use crate::cookie::{self, CookieWrite};

// =========================================================
// 存储后端抽象
// =========================================================

/// 持久化存储后端
///
/// 所有方法都不返回错误：存储不可用时读取返回 `None`，写入静默失败。
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> bool;
    fn remove_item(&self, key: &str) -> bool;
    /// 写入一条 `name=value; attr...` 形式的 Cookie
    fn write_cookie(&self, cookie: &str);
    /// 当前可见的 Cookie 头，形如 `a=1; b=2`
    fn cookie_header(&self) -> String;
}

// =========================================================
// 会话
// =========================================================

/// 已登录的会话：Bearer Token 与角色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Self {
            token: data.token,
            role: data.user.role,
        }
    }
}

// =========================================================
// TokenStore
// =========================================================

#[derive(Debug, Clone)]
pub struct TokenStore<B> {
    backend: B,
    cookie_max_age: u64,
}

impl<B: StorageBackend> TokenStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cookie_max_age: TOKEN_COOKIE_MAX_AGE_SECS,
        }
    }

    pub fn with_cookie_max_age(mut self, secs: u64) -> Self {
        self.cookie_max_age = secs;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Token ---

    pub fn get(&self) -> Option<String> {
        self.backend
            .get_item(STORAGE_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// 保存 Token 并同步写入 Cookie
    pub fn set(&self, token: &str) {
        self.backend.set_item(STORAGE_TOKEN_KEY, token);
        self.backend
            .write_cookie(&cookie::session_cookie(token, self.cookie_max_age));
    }

    /// 删除 Token 并让 Cookie 立即过期
    pub fn clear(&self) {
        self.backend.remove_item(STORAGE_TOKEN_KEY);
        self.backend.write_cookie(&cookie::expired_session_cookie());
    }

    // --- Role ---

    pub fn get_role(&self) -> Option<Role> {
        self.backend
            .get_item(STORAGE_ROLE_KEY)
            .filter(|r| !r.is_empty())
            .map(Role::from)
    }

    pub fn set_role(&self, role: &Role) {
        self.backend.set_item(STORAGE_ROLE_KEY, role.as_str());
    }

    pub fn clear_role(&self) {
        self.backend.remove_item(STORAGE_ROLE_KEY);
    }

    // --- Session lifecycle ---

    /// 从持久化存储恢复会话（页面刷新后）
    pub fn session(&self) -> Option<Session> {
        let token = self.get()?;
        let role = self
            .get_role()
            .unwrap_or_else(|| Role::Other(String::new()));
        Some(Session { token, role })
    }

    /// 登录：写入 Token、角色与 Cookie
    pub fn begin(&self, session: &Session) {
        self.set(&session.token);
        self.set_role(&session.role);
    }

    /// 注销：清除 Token、角色与 Cookie
    pub fn end(&self) {
        self.clear();
        self.clear_role();
    }

    pub fn cookie_header(&self) -> String {
        self.backend.cookie_header()
    }
}

// =========================================================
// 内存后端
// =========================================================

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    cookies: BTreeMap<String, String>,
}

/// 内存存储后端
///
/// 克隆后共享同一份数据。Cookie 写入按 `max-age=0` 语义删除。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.inner.borrow();
        inner.items.is_empty() && inner.cookies.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.borrow().items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> bool {
        self.inner
            .borrow_mut()
            .items
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove_item(&self, key: &str) -> bool {
        self.inner.borrow_mut().items.remove(key);
        true
    }

    fn write_cookie(&self, cookie: &str) {
        let Some(write) = CookieWrite::parse(cookie) else {
            return;
        };
        let mut inner = self.inner.borrow_mut();
        if write.is_removal() {
            inner.cookies.remove(&write.name);
        } else {
            inner.cookies.insert(write.name, write.value);
        }
    }

    fn cookie_header(&self) -> String {
        self.inner
            .borrow()
            .cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// 没有任何持久化能力的后端（非交互渲染环境）
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl StorageBackend for NullStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn remove_item(&self, _key: &str) -> bool {
        false
    }

    fn write_cookie(&self, _cookie: &str) {}

    fn cookie_header(&self) -> String {
        String::new()
    }
}
