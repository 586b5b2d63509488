//! 浏览器存储后端
//!
//! LocalStorage 保存 Token 与角色，`document.cookie` 供路由守卫读取。

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;
use wms_client::StorageBackend;

/// `StorageBackend` 的浏览器实现
///
/// 任何一步拿不到浏览器对象时都按"不可用"处理：读取返回 `None`，写入返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove_item(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    fn write_cookie(&self, cookie: &str) {
        if let Some(doc) = Self::document() {
            if doc.set_cookie(cookie).is_err() {
                log::warn!("failed to write cookie");
            }
        }
    }

    fn cookie_header(&self) -> String {
        Self::document()
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }
}
