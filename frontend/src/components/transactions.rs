use leptos::prelude::*;
use leptos::task::spawn_local;
use wms_client::RequestSequencer;
use wms_shared::protocol::{ProductFilters, TransactionFilters};
use wms_shared::{CreateTransaction, Product, Transaction, TransactionType};

use crate::auth::use_auth;
use crate::components::common::icons::Plus;
use crate::components::common::{Modal, Pagination, failure_message, use_toast};
use crate::config::use_config;

/// 选择商品时一次拉取的数量
const PRODUCT_OPTIONS_PER_PAGE: u32 = 1000;

pub fn type_badge_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::In => "badge badge-success",
        TransactionType::Out => "badge badge-error",
    }
}

/// 表格中一行的展示文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub product_name: String,
    pub kind_label: &'static str,
    pub quantity: String,
    pub date: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        let sign = match tx.kind {
            TransactionType::In => '+',
            TransactionType::Out => '-',
        };
        Self {
            product_name: tx
                .product_name
                .clone()
                .unwrap_or_else(|| format!("Product #{}", tx.product_id)),
            kind_label: tx.kind.as_str(),
            quantity: format!("{}{}", sign, tx.quantity),
            date: tx.created_at_display(),
        }
    }
}

/// 组装新增流水请求：必须选中商品，数量为正整数
pub fn build_transaction(
    product_id: Option<u64>,
    kind: TransactionType,
    quantity: &str,
) -> Result<CreateTransaction, String> {
    let product_id = product_id.ok_or_else(|| "Please select a product".to_string())?;
    let quantity = match quantity.trim().parse::<i64>() {
        Ok(q) if q >= 1 => q,
        _ => return Err("Quantity must be at least 1".to_string()),
    };
    Ok(CreateTransaction {
        product_id,
        kind,
        quantity,
    })
}

/// 下拉框的商品选项一次取全
fn product_option_filters() -> ProductFilters {
    ProductFilters {
        per_page: Some(PRODUCT_OPTIONS_PER_PAGE),
        ..Default::default()
    }
}

fn product_option_label(product: &Product) -> String {
    format!("{} (Stock: {})", product.name, product.stock)
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let per_page = use_config().default_per_page;

    let transactions = RwSignal::new(Vec::<Transaction>::new());
    let total_pages = RwSignal::new(0u32);
    let loading = RwSignal::new(true);
    let page = RwSignal::new(1u32);
    let reload = RwSignal::new(0u32);
    let sequencer = StoredValue::new(RequestSequencer::new());

    Effect::new(move |_| {
        reload.track();
        let filters = TransactionFilters {
            product_id: None,
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
                        log::error!("failed to load transactions: {}", e);
                        toast.error(failure_message(&e, "Failed to load transactions"));
                    }
                }
                loading.set(false);
            });
        });
    });

    // 新增流水弹窗
    let modal_open = RwSignal::new(false);
    let products = RwSignal::new(Vec::<Product>::new());
    let selected = RwSignal::new(Option::<u64>::None);
    let kind = RwSignal::new(TransactionType::In);
    let quantity = RwSignal::new("1".to_string());
    let submitting = RwSignal::new(false);

    let load_products = move || {
        let filters = product_option_filters();
        spawn_local(async move {
            match auth.api().products().list(&filters).await {
                Ok(res) => products.set(res.data),
                Err(e) => {
                    log::error!("failed to load product options: {}", e);
                    toast.error(failure_message(&e, "Failed to load products"));
                }
            }
        });
    };

    let open_modal = move |_| {
        selected.set(None);
        kind.set(TransactionType::In);
        quantity.set("1".to_string());
        load_products();
        modal_open.set(true);
    };

    let selected_stock = move || {
        let id = selected.get()?;
        products.with(|list| list.iter().find(|p| p.id == id).map(|p| p.stock))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = match build_transaction(
            selected.get_untracked(),
            kind.get_untracked(),
            &quantity.get_untracked(),
        ) {
            Ok(req) => req,
            Err(msg) => {
                toast.error(msg);
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            match auth.api().transactions().create(&req).await {
                Ok(_) => {
                    log::info!(
                        "recorded {} x{} for product {}",
                        req.kind,
                        req.quantity,
                        req.product_id
                    );
                    toast.success("Transaction added successfully!");
                    modal_open.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("failed to add transaction: {}", e);
                    toast.error(failure_message(&e, "Failed to add transaction"));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col gap-4 sm:flex-row sm:items-center sm:justify-between">
                <div>
                    <h1 class="text-2xl font-bold">"Transactions"</h1>
                    <p class="text-base-content/70">"Track all inventory movements"</p>
                </div>
                <button class="btn btn-primary gap-2" on:click=open_modal>
                    <Plus attr:class="h-4 w-4" />
                    "Add Transaction"
                </button>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body pb-0">
                    <h2 class="card-title">"All Transactions"</h2>
                </div>
                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"Type"</th>
                                <th>"Quantity"</th>
                                <th>"Date"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                if loading.get() && transactions.with(Vec::is_empty) {
                                    return view! {
                                        <tr><td colspan="4" class="text-center py-8">"Loading..."</td></tr>
                                    }
                                    .into_any();
                                }
                                if transactions.with(Vec::is_empty) {
                                    return view! {
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/60">
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
                                                <td class="font-medium">{row.product_name}</td>
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

            <Modal open=modal_open title="Add Transaction">
                <form class="space-y-2" on:submit=on_submit>
                    <div class="form-control">
                        <label for="tx-product" class="label">
                            <span class="label-text">"Product"</span>
                        </label>
                        <select
                            id="tx-product"
                            class="select select-bordered w-full"
                            required
                            on:change=move |ev| selected.set(event_target_value(&ev).parse().ok())
                        >
                            <option value="" selected=move || selected.get().is_none()>
                                "Select a product"
                            </option>
                            {move || {
                                products
                                    .get()
                                    .into_iter()
                                    .map(|p| {
                                        let id = p.id;
                                        view! {
                                            <option value=id.to_string() selected=move || selected.get() == Some(id)>
                                                {product_option_label(&p)}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>

                    <div class="form-control">
                        <label for="tx-type" class="label">
                            <span class="label-text">"Type"</span>
                        </label>
                        <select
                            id="tx-type"
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                if let Some(t) = TransactionType::parse(&event_target_value(&ev)) {
                                    kind.set(t);
                                }
                            }
                        >
                            <option value="IN" selected=move || kind.get() == TransactionType::In>
                                "IN (Stock In)"
                            </option>
                            <option value="OUT" selected=move || kind.get() == TransactionType::Out>
                                "OUT (Stock Out)"
                            </option>
                        </select>
                    </div>

                    <div class="form-control">
                        <label for="tx-quantity" class="label">
                            <span class="label-text">"Quantity"</span>
                        </label>
                        <input
                            id="tx-quantity"
                            type="number"
                            min="1"
                            required
                            class="input input-bordered w-full"
                            prop:value=move || quantity.get()
                            on:input=move |ev| quantity.set(event_target_value(&ev))
                        />
                        <Show when=move || kind.get() == TransactionType::Out>
                            {move || selected_stock().map(|stock| view! {
                                <label class="label">
                                    <span class="label-text-alt text-warning">
                                        {format!("Current stock: {}", stock)}
                                    </span>
                                </label>
                            })}
                        </Show>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| modal_open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Add Transaction" }}
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

    fn tx(kind: TransactionType, product_name: Option<&str>) -> Transaction {
        Transaction {
            id: 1,
            product_id: 7,
            kind,
            quantity: 3,
            created_at: "not a date".to_string(),
            product_name: product_name.map(str::to_string),
            product_stock: None,
        }
    }

    #[test]
    fn rows_show_signed_quantity_and_type() {
        let row = TransactionRow::from(&tx(TransactionType::Out, Some("Bolt")));
        assert_eq!(row.product_name, "Bolt");
        assert_eq!(row.kind_label, "OUT");
        assert_eq!(row.quantity, "-3");
        assert_eq!(row.date, "not a date");

        let row = TransactionRow::from(&tx(TransactionType::In, None));
        assert_eq!(row.product_name, "Product #7");
        assert_eq!(row.quantity, "+3");
    }

    #[test]
    fn transaction_requires_product_and_positive_quantity() {
        assert_eq!(
            build_transaction(None, TransactionType::In, "1").unwrap_err(),
            "Please select a product"
        );
        assert_eq!(
            build_transaction(Some(4), TransactionType::Out, "0").unwrap_err(),
            "Quantity must be at least 1"
        );

        let req = build_transaction(Some(4), TransactionType::Out, " 2 ").unwrap();
        assert_eq!(req.product_id, 4);
        assert_eq!(req.kind, TransactionType::Out);
        assert_eq!(req.quantity, 2);
    }

    #[test]
    fn product_options_request_one_large_page() {
        use wms_shared::protocol::ApiRequest;

        assert_eq!(product_option_filters().path(), "/products?perPage=1000");
    }

    #[test]
    fn options_include_stock() {
        let product = Product {
            id: 1,
            name: "Bolt".to_string(),
            sku: "B-1".to_string(),
            stock: 12,
            minimum_stock: 2,
            shelf_location: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(product_option_label(&product), "Bolt (Stock: 12)");
    }
}
