use leptos::prelude::*;
use leptos::task::spawn_local;
use wms_client::RequestSequencer;
use wms_shared::protocol::ProductFilters;
use wms_shared::{Product, ProductSortField, SortOrder};

use crate::auth::use_auth;
use crate::components::common::icons::{ChevronDown, ChevronUp, Eye, Plus, Search, Trash};
use crate::components::common::{Modal, Pagination, failure_message, use_toast};
use crate::components::product_form::{FormState, ProductFields};
use crate::config::use_config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 点击表头后的排序状态：同一列切换方向，新列从升序开始
pub fn next_sort(
    current: ProductSortField,
    order: SortOrder,
    clicked: ProductSortField,
) -> (ProductSortField, SortOrder) {
    if current == clicked {
        (current, order.toggled())
    } else {
        (clicked, SortOrder::Asc)
    }
}

/// 当前页内按所选列排序
pub fn sort_products(products: &mut [Product], field: ProductSortField, order: SortOrder) {
    products.sort_by(|a, b| order.apply(a.compare_by(b, field)));
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
fn SortHeader(
    #[prop(into)] label: String,
    field: ProductSortField,
    sort: RwSignal<ProductSortField>,
    order: RwSignal<SortOrder>,
) -> impl IntoView {
    let on_click = move |_| {
        let (next_field, next_order) = next_sort(sort.get_untracked(), order.get_untracked(), field);
        sort.set(next_field);
        order.set(next_order);
    };

    view! {
        <th class="cursor-pointer select-none" on:click=on_click>
            <span class="inline-flex items-center gap-1">
                {label}
                {move || (sort.get() == field).then(|| match order.get() {
                    SortOrder::Asc => view! { <ChevronUp attr:class="h-4 w-4" /> }.into_any(),
                    SortOrder::Desc => view! { <ChevronDown attr:class="h-4 w-4" /> }.into_any(),
                })}
            </span>
        </th>
    }
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let router = use_router();
    let per_page = use_config().default_per_page;
    let is_admin = auth.is_admin_signal();

    let products = RwSignal::new(Vec::<Product>::new());
    let total_pages = RwSignal::new(0u32);
    let loading = RwSignal::new(true);

    let keyword = RwSignal::new(String::new());
    let sort = RwSignal::new(ProductSortField::Id);
    let order = RwSignal::new(SortOrder::Asc);
    let page = RwSignal::new(1u32);
    // 增删后递增以触发重新加载
    let reload = RwSignal::new(0u32);
    let sequencer = StoredValue::new(RequestSequencer::new());

    Effect::new(move |_| {
        reload.track();
        let filters = ProductFilters {
            keyword: Some(keyword.get()).filter(|k| !k.trim().is_empty()),
            sort: Some(sort.get()),
            page: Some(page.get()),
            per_page: Some(per_page),
        };
        let order = order.get();
        let seq = sequencer.get_value();
        let ticket = seq.issue();
        loading.set(true);

        spawn_local(async move {
            let result = auth.api().products().list(&filters).await;
            seq.apply_if_current(ticket, result, |result| {
                match result {
                    Ok(mut res) => {
                        sort_products(&mut res.data, filters.sort.unwrap_or_default(), order);
                        products.set(res.data);
                        total_pages.set(res.meta.total_pages);
                    }
                    Err(e) => {
                        log::error!("failed to load products: {}", e);
                        toast.error(failure_message(&e, "Failed to load products"));
                    }
                }
                loading.set(false);
            });
        });
    });

    let on_search = move |ev: leptos::ev::Event| {
        keyword.set(event_target_value(&ev));
        page.set(1);
    };

    let handle_delete = move |id: u64| {
        if !confirm("Are you sure you want to delete this product?") {
            return;
        }
        spawn_local(async move {
            match auth.api().products().delete(id).await {
                Ok(_) => {
                    toast.success("Product deleted successfully!");
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("failed to delete product {}: {}", id, e);
                    toast.error(failure_message(&e, "Failed to delete product"));
                }
            }
        });
    };

    // 新增商品弹窗
    let modal_open = RwSignal::new(false);
    let form = FormState::new();
    let submitting = RwSignal::new(false);

    let open_modal = move |_| {
        form.reset();
        modal_open.set(true);
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = match form.to_request() {
            Ok(req) => req,
            Err(msg) => {
                toast.error(msg);
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            match auth.api().products().create(&req).await {
                Ok(res) => {
                    log::info!("created product {} ({})", res.data.id, res.data.sku);
                    toast.success("Product added successfully!");
                    modal_open.set(false);
                    form.reset();
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("failed to create product: {}", e);
                    toast.error(failure_message(&e, "Failed to add product"));
                }
            }
            submitting.set(false);
        });
    };

    let column_count = move || if is_admin.get() { 6 } else { 5 };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col gap-4 sm:flex-row sm:items-center sm:justify-between">
                <div>
                    <h1 class="text-2xl font-bold">"Products"</h1>
                    <p class="text-base-content/70">"Manage your warehouse inventory"</p>
                </div>
                <Show when=move || is_admin.get()>
                    <button class="btn btn-primary gap-2" on:click=open_modal>
                        <Plus attr:class="h-4 w-4" />
                        "Add Product"
                    </button>
                </Show>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="p-4 border-b border-base-200">
                    <label class="input input-bordered flex items-center gap-2 max-w-sm">
                        <Search attr:class="h-4 w-4 opacity-60" />
                        <input
                            type="search"
                            class="grow"
                            placeholder="Search products..."
                            prop:value=move || keyword.get()
                            on:input=on_search
                        />
                    </label>
                </div>

                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <SortHeader label="Name" field=ProductSortField::Name sort=sort order=order />
                                <SortHeader label="SKU" field=ProductSortField::Sku sort=sort order=order />
                                <SortHeader label="Stock" field=ProductSortField::Stock sort=sort order=order />
                                <th>"Location"</th>
                                <th>"Min Stock"</th>
                                <Show when=move || is_admin.get()>
                                    <th class="text-right">"Actions"</th>
                                </Show>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                if loading.get() && products.with(Vec::is_empty) {
                                    return view! {
                                        <tr>
                                            <td colspan=column_count() class="text-center py-8">
                                                <span class="loading loading-spinner text-primary"></span>
                                            </td>
                                        </tr>
                                    }
                                    .into_any();
                                }
                                if products.with(Vec::is_empty) {
                                    return view! {
                                        <tr>
                                            <td colspan=column_count() class="text-center py-8 text-base-content/60">
                                                "No products found"
                                            </td>
                                        </tr>
                                    }
                                    .into_any();
                                }

                                products
                                    .get()
                                    .into_iter()
                                    .map(|product| {
                                        let id = product.id;
                                        let low = product.is_low_stock();
                                        let location = product.shelf_location().to_string();
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">{product.name}</td>
                                                <td class="font-mono text-sm">{product.sku}</td>
                                                <td>
                                                    <span class="inline-flex items-center gap-2">
                                                        {product.stock}
                                                        {low.then(|| view! {
                                                            <span class="badge badge-warning badge-sm">"Low"</span>
                                                        })}
                                                    </span>
                                                </td>
                                                <td>{if location.is_empty() { "-".to_string() } else { location }}</td>
                                                <td>{product.minimum_stock}</td>
                                                <Show when=move || is_admin.get()>
                                                    <td class="text-right whitespace-nowrap">
                                                        <button
                                                            class="btn btn-ghost btn-xs gap-1"
                                                            on:click=move |_| router.navigate(&AppRoute::ProductDetail(id).to_path())
                                                        >
                                                            <Eye attr:class="h-4 w-4" />
                                                            "View"
                                                        </button>
                                                        <span class="text-base-content/30">"|"</span>
                                                        <button
                                                            class="btn btn-ghost btn-xs gap-1 text-error"
                                                            on:click=move |_| handle_delete(id)
                                                        >
                                                            <Trash attr:class="h-4 w-4" />
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </Show>
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

            <Modal open=modal_open title="Add New Product">
                <form class="space-y-2" on:submit=on_create>
                    <ProductFields state=form prefix="new-product" />
                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| modal_open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Adding..." } else { "Add Product" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            stock,
            minimum_stock: 0,
            shelf_location: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn clicking_the_same_column_flips_direction() {
        let (field, order) = next_sort(ProductSortField::Name, SortOrder::Asc, ProductSortField::Name);
        assert_eq!((field, order), (ProductSortField::Name, SortOrder::Desc));

        let (field, order) = next_sort(field, order, ProductSortField::Name);
        assert_eq!((field, order), (ProductSortField::Name, SortOrder::Asc));
    }

    #[test]
    fn new_column_starts_ascending() {
        let (field, order) = next_sort(ProductSortField::Name, SortOrder::Desc, ProductSortField::Stock);
        assert_eq!((field, order), (ProductSortField::Stock, SortOrder::Asc));
    }

    #[test]
    fn sorts_the_current_page() {
        let mut list = vec![product(1, "bolt", 5), product(2, "Anchor", 9), product(3, "clamp", 1)];

        sort_products(&mut list, ProductSortField::Name, SortOrder::Asc);
        let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Anchor", "bolt", "clamp"]);

        sort_products(&mut list, ProductSortField::Stock, SortOrder::Desc);
        let stock: Vec<_> = list.iter().map(|p| p.stock).collect();
        assert_eq!(stock, [9, 5, 1]);
    }
}
