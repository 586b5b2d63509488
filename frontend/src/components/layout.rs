//! 侧边栏布局
//!
//! 桌面端固定侧边栏，移动端通过左上角按钮展开抽屉。

use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::common::icons::{FileText, LayoutDashboard, LogOut, Menu, Package, X};
use crate::web::route::is_active;
use crate::web::router::{Link, use_router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuIcon {
    Dashboard,
    Products,
    Transactions,
}

const MENU_ITEMS: [(&str, &str, MenuIcon); 3] = [
    ("/dashboard", "Dashboard", MenuIcon::Dashboard),
    ("/products", "Products", MenuIcon::Products),
    ("/transactions", "Transactions", MenuIcon::Transactions),
];

fn menu_icon(icon: MenuIcon) -> AnyView {
    match icon {
        MenuIcon::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Products => view! { <Package attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Transactions => view! { <FileText attr:class="h-5 w-5" /> }.into_any(),
    }
}

#[component]
fn SidebarContent(mobile_open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let on_logout = move |_| {
        mobile_open.set(false);
        logout(&auth);
    };

    view! {
        <div class="p-6 border-b border-base-200">
            <div class="flex items-center gap-3">
                <div class="bg-primary p-2 rounded-lg text-primary-content">
                    <Package attr:class="h-6 w-6" />
                </div>
                <div>
                    <h1 class="text-lg font-bold">"WMS"</h1>
                    <p class="text-xs text-base-content/60">"Warehouse System"</p>
                </div>
            </div>
            <span class="badge badge-outline badge-sm mt-3 capitalize">
                {move || auth.state.with(|s| s.role_label())}
            </span>
        </div>

        <ul class="menu flex-1 p-4 w-full gap-1">
            {MENU_ITEMS
                .into_iter()
                .map(|(href, label, icon)| {
                    let class = Signal::derive(move || {
                        if is_active(&router.current_route().get(), href) {
                            "flex items-center gap-3 active font-medium".to_string()
                        } else {
                            "flex items-center gap-3".to_string()
                        }
                    });
                    view! {
                        <li>
                            <Link to=href class=class on_navigate=Callback::new(move |_| mobile_open.set(false))>
                                {menu_icon(icon)}
                                <span>{label}</span>
                            </Link>
                        </li>
                    }
                })
                .collect_view()}
        </ul>

        <div class="p-4 border-t border-base-200">
            <button class="btn btn-ghost text-error w-full justify-start gap-3" on:click=on_logout>
                <LogOut attr:class="h-5 w-5" />
                "Logout"
            </button>
        </div>
    }
}

/// 受保护页面的外壳
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let mobile_open = RwSignal::new(false);

    view! {
        <div class="min-h-screen bg-base-200">
            <button
                class="lg:hidden fixed top-4 left-4 z-50 btn btn-square btn-sm bg-base-100 shadow"
                on:click=move |_| mobile_open.update(|open| *open = !*open)
            >
                {move || if mobile_open.get() {
                    view! { <X attr:class="h-6 w-6" /> }.into_any()
                } else {
                    view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                }}
            </button>

            <aside class="hidden lg:flex lg:flex-col lg:fixed lg:inset-y-0 lg:w-64 bg-base-100 border-r border-base-200">
                <SidebarContent mobile_open=mobile_open />
            </aside>

            <Show when=move || mobile_open.get()>
                <div class="lg:hidden fixed inset-0 bg-black/50 z-40" on:click=move |_| mobile_open.set(false)></div>
                <aside class="lg:hidden fixed inset-y-0 left-0 w-64 bg-base-100 border-r border-base-200 z-50 flex flex-col">
                    <SidebarContent mobile_open=mobile_open />
                </aside>
            </Show>

            <main class="lg:pl-64">
                <div class="p-4 pt-16 md:p-8 lg:pt-8 max-w-7xl mx-auto">{children()}</div>
            </main>
        </div>
    }
}
