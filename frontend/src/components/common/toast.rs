//! 全局通知
//!
//! 通知挂在 App 根部，跨页面导航依然可见（登录成功后的提示需要在跳转后继续显示）。

use std::time::Duration;

use leptos::prelude::*;
use wms_client::ApiError;

use super::icons::{CheckCircle, X, XCircle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    current: RwSignal<Option<ToastMessage>>,
    next_id: StoredValue<u64>,
    duration_ms: u64,
}

impl ToastContext {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, text.into());
    }

    /// 新通知替换旧通知；到期时只关闭自己
    fn show(&self, kind: ToastKind, text: String) {
        self.next_id.update_value(|id| *id += 1);
        let id = self.next_id.get_value();
        self.current.set(Some(ToastMessage { id, kind, text }));

        let current = self.current;
        set_timeout(
            move || {
                if current.with_untracked(|t| t.as_ref().is_some_and(|t| t.id == id)) {
                    current.set(None);
                }
            },
            Duration::from_millis(self.duration_ms),
        );
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 错误通知文本：优先使用归一化后的错误消息
pub fn failure_message(err: &ApiError, fallback: &str) -> String {
    let message = err.message().trim();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    move || {
        toast.current.get().map(|msg| {
            let (alert_class, icon) = match msg.kind {
                ToastKind::Success => (
                    "alert alert-success shadow-lg",
                    view! { <CheckCircle attr:class="h-5 w-5" /> }.into_any(),
                ),
                ToastKind::Error => (
                    "alert alert-error shadow-lg",
                    view! { <XCircle attr:class="h-5 w-5" /> }.into_any(),
                ),
            };

            view! {
                <div class="toast toast-top toast-end z-50">
                    <div role="alert" class=alert_class>
                        {icon}
                        <span class="text-sm font-medium">{msg.text}</span>
                        <button class="btn btn-ghost btn-xs btn-circle" on:click=move |_| toast.dismiss()>
                            <X attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = ApiError::status(401, "Invalid credentials");
        assert_eq!(failure_message(&err, "Failed to load"), "Invalid credentials");
    }

    #[test]
    fn blank_message_uses_fallback() {
        let err = ApiError::network("  ");
        assert_eq!(failure_message(&err, "Failed to load products"), "Failed to load products");
    }
}
