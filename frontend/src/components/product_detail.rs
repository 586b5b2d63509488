use leptos::prelude::*;
use leptos::task::spawn_local;
use wms_client::RequestSequencer;
use wms_shared::protocol::TransactionFilters;
use wms_shared::{Product, Transaction};

use crate::auth::use_auth;
use crate::components::common::icons::{ArrowLeft, History};
use crate::components::common::{Pagination, failure_message, use_toast};
use crate::components::product_form::{FormState, ProductFields};
use crate::components::transactions::{TransactionRow, type_badge_class};
use crate::config::use_config;
use crate::web::router::use_router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Details,
    History,
}

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Loaded(Product),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Loaded,
    NotFound,
}

impl LoadState {
    fn phase(&self) -> Phase {
        match self {
            LoadState::Loading => Phase::Loading,
            LoadState::Loaded(_) => Phase::Loaded,
            LoadState::NotFound => Phase::NotFound,
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "tab tab-active" } else { "tab" }
}

#[component]
pub fn ProductDetailPage(id: u64) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let router = use_router();
    let is_admin = auth.is_admin_signal();

    let state = RwSignal::new(LoadState::Loading);
    let tab = RwSignal::new(Tab::Details);
    let form = FormState::new();
    let editing = RwSignal::new(false);
    let saving = RwSignal::new(false);

    spawn_local(async move {
        match auth.api().products().get_by_id(id).await {
            Ok(res) => {
                form.fill_from(&res.data);
                state.set(LoadState::Loaded(res.data));
            }
            Err(e) => {
                log::error!("failed to load product {}: {}", id, e);
                if e.status_code() != Some(404) {
                    toast.error(failure_message(&e, "Failed to load product"));
                }
                state.set(LoadState::NotFound);
            }
        }
    });

    let on_cancel = move |_| {
        if let LoadState::Loaded(product) = state.get_untracked() {
            form.fill_from(&product);
        }
        editing.set(false);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = match form.to_request() {
            Ok(req) => req,
            Err(msg) => {
                toast.error(msg);
                return;
            }
        };

        saving.set(true);
        spawn_local(async move {
            match auth.api().products().update(id, req).await {
                Ok(res) => {
                    form.fill_from(&res.data);
                    state.set(LoadState::Loaded(res.data));
                    editing.set(false);
                    toast.success("Product updated successfully!");
                }
                Err(e) => {
                    log::error!("failed to update product {}: {}", id, e);
                    toast.error(failure_message(&e, "Failed to update product"));
                }
            }
            saving.set(false);
        });
    };

    let back = move |_| router.navigate("/products");
    // 保存成功只刷新字段，不重建整页
    let phase = Memo::new(move |_| state.with(LoadState::phase));

    let header = move || {
        state.with(|s| match s {
            LoadState::Loaded(p) => Some((p.name.clone(), p.sku.clone())),
            _ => None,
        })
    };

    view! {
        <div class="space-y-6">
            <button class="btn btn-ghost btn-sm gap-2" on:click=back>
                <ArrowLeft attr:class="h-4 w-4" />
                "Back to Products"
            </button>

            {move || match phase.get() {
                Phase::Loading => view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                        <span class="sr-only">"Loading..."</span>
                    </div>
                }
                .into_any(),
                Phase::NotFound => view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center">
                            <h2 class="card-title">"Product not found"</h2>
                            <p class="text-base-content/70">"The product may have been removed."</p>
                        </div>
                    </div>
                }
                .into_any(),
                Phase::Loaded => view! {
                    <div>
                        <h1 class="text-2xl font-bold">{move || header().map(|(name, _)| name)}</h1>
                        <p class="text-base-content/70 font-mono text-sm">
                            {move || header().map(|(_, sku)| format!("SKU: {}", sku))}
                        </p>
                    </div>

                    <div role="tablist" class="tabs tabs-bordered">
                        <a role="tab" class=move || tab_class(tab.get() == Tab::Details) on:click=move |_| tab.set(Tab::Details)>
                            "Details"
                        </a>
                        <a role="tab" class=move || tab_class(tab.get() == Tab::History) on:click=move |_| tab.set(Tab::History)>
                            "History"
                        </a>
                    </div>

                    <Show
                        when=move || tab.get() == Tab::Details
                        fallback=move || view! { <ProductHistory product_id=id /> }
                    >
                        <div class="card bg-base-100 shadow">
                            <form class="card-body" on:submit=on_save>
                                <div class="flex items-center justify-between">
                                    <h2 class="card-title">"Product Information"</h2>
                                    <Show when=move || is_admin.get() && !editing.get()>
                                        <button type="button" class="btn btn-sm btn-outline" on:click=move |_| editing.set(true)>
                                            "Edit Product"
                                        </button>
                                    </Show>
                                </div>

                                <div class="grid gap-2 md:grid-cols-2">
                                    <ProductFields
                                        state=form
                                        prefix="product"
                                        disabled=Signal::derive(move || !editing.get())
                                    />
                                </div>

                                <Show when=move || editing.get()>
                                    <div class="card-actions justify-end mt-4">
                                        <button type="button" class="btn" on:click=on_cancel>
                                            "Cancel"
                                        </button>
                                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                        </button>
                                    </div>
                                </Show>
                            </form>
                        </div>
                    </Show>
                }
                .into_any(),
            }}
        </div>
    }
}

/// 单个商品的出入库记录
#[component]
fn ProductHistory(product_id: u64) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let per_page = use_config().default_per_page;

    let transactions = RwSignal::new(Vec::<Transaction>::new());
    let total_pages = RwSignal::new(0u32);
    let loading = RwSignal::new(true);
    let page = RwSignal::new(1u32);
    let sequencer = StoredValue::new(RequestSequencer::new());

    Effect::new(move |_| {
        let filters = TransactionFilters {
            product_id: Some(product_id),
            page: Some(page.get()),
            per_page: Some(per_page),
        };
        let seq = sequencer.get_value();
        let ticket = seq.issue();
        loading.set(true);

        spawn_local(async move {
            let result = auth.api().transactions().list(&filters).await;
            seq.apply_if_current(ticket, result, |result| {
                match result {
                    Ok(res) => {
                        transactions.set(res.data);
                        total_pages.set(res.meta.total_pages);
                    }
                    Err(e) => {
                        log::error!("failed to load history for product {}: {}", product_id, e);
                        toast.error(failure_message(&e, "Failed to load transactions"));
                    }
                }
                loading.set(false);
            });
        });
    });

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body pb-0">
                <h2 class="card-title gap-2">
                    <History attr:class="h-5 w-5" />
                    "Transaction History"
                </h2>
            </div>
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Type"</th>
                            <th>"Quantity"</th>
                            <th>"Date"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() && transactions.with(Vec::is_empty) {
                                return view! {
                                    <tr><td colspan="3" class="text-center py-8">"Loading..."</td></tr>
                                }
                                .into_any();
                            }
                            if transactions.with(Vec::is_empty) {
                                return view! {
                                    <tr>
                                        <td colspan="3" class="text-center py-8 text-base-content/60">
                                            "No transactions found"
                                        </td>
                                    </tr>
                                }
                                .into_any();
                            }
                            transactions
                                .get()
                                .into_iter()
                                .map(|tx| {
                                    let row = TransactionRow::from(&tx);
                                    view! {
                                        <tr class="hover">
                                            <td><span class=type_badge_class(tx.kind)>{row.kind_label}</span></td>
                                            <td>{row.quantity}</td>
                                            <td class="text-sm">{row.date}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
            <Pagination page=page total_pages=total_pages />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_ignores_product_contents() {
        assert_eq!(LoadState::Loading.phase(), Phase::Loading);
        assert_eq!(LoadState::NotFound.phase(), Phase::NotFound);
    }

    #[test]
    fn only_the_active_tab_is_highlighted() {
        assert_eq!(tab_class(true), "tab tab-active");
        assert_eq!(tab_class(false), "tab");
    }
}
