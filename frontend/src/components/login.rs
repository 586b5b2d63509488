use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{complete_login, login, use_auth};
use crate::components::common::icons::{LogIn, Package};
use crate::components::common::{failure_message, use_toast};

/// 登录成功提示展示多久后离开登录页
const REDIRECT_DELAY_MS: u32 = 500;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            toast.error("Please fill in all fields");
            return;
        }

        is_submitting.set(true);
        spawn_local(async move {
            match login(&auth, email, password).await {
                Ok(session) => {
                    toast.success("Login successful!");
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    complete_login(&auth, session);
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    toast.error(failure_message(&e, "Invalid credentials"));
                }
            }
            is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Package attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Warehouse Management"</h1>
                        <p class="text-base-content/70">"Sign in to your account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@example.com"
                                autocomplete="username"
                                on:input=move |ev| email.set(event_target_value(&ev))
                                prop:value=move || email.get()
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=move || password.get()
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    view! { <LogIn attr:class="h-4 w-4" /> "Sign In" }.into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
