//! 商品表单
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置 / 从已有商品回填
//! - 数据到请求对象的转换
//!
//! 新增弹窗与详情页的编辑表单共用这一份状态和字段组件。

use leptos::prelude::*;
use wms_shared::{CreateProduct, Product};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
/// 数字字段按输入框原文保存，提交时再解析。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub sku: RwSignal<String>,
    pub stock: RwSignal<String>,
    pub shelf_location: RwSignal<String>,
    pub minimum_stock: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            sku: RwSignal::new(String::new()),
            stock: RwSignal::new("0".to_string()),
            shelf_location: RwSignal::new(String::new()),
            minimum_stock: RwSignal::new("0".to_string()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.sku.set(String::new());
        self.stock.set("0".to_string());
        self.shelf_location.set(String::new());
        self.minimum_stock.set("0".to_string());
    }

    pub fn fill_from(&self, product: &Product) {
        self.name.set(product.name.clone());
        self.sku.set(product.sku.clone());
        self.stock.set(product.stock.to_string());
        self.shelf_location.set(product.shelf_location().to_string());
        self.minimum_stock.set(product.minimum_stock.to_string());
    }

    /// 将表单状态转换为 API 请求对象
    pub fn to_request(&self) -> Result<CreateProduct, String> {
        build_request(
            &self.name.get_untracked(),
            &self.sku.get_untracked(),
            &self.stock.get_untracked(),
            &self.shelf_location.get_untracked(),
            &self.minimum_stock.get_untracked(),
        )
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_quantity(label: &str, raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        Ok(_) => Err(format!("{} cannot be negative", label)),
        Err(_) => Err(format!("{} must be a whole number", label)),
    }
}

/// 校验并组装请求体：名称与 SKU 必填，库存类字段为非负整数，货架位置可空
pub fn build_request(
    name: &str,
    sku: &str,
    stock: &str,
    shelf_location: &str,
    minimum_stock: &str,
) -> Result<CreateProduct, String> {
    let name = name.trim();
    let sku = sku.trim();
    if name.is_empty() {
        return Err("Product name is required".to_string());
    }
    if sku.is_empty() {
        return Err("SKU is required".to_string());
    }

    let shelf_location = shelf_location.trim();
    Ok(CreateProduct {
        name: name.to_string(),
        sku: sku.to_string(),
        stock: parse_quantity("Stock", stock)?,
        shelf_location: (!shelf_location.is_empty()).then(|| shelf_location.to_string()),
        minimum_stock: parse_quantity("Minimum stock", minimum_stock)?,
    })
}

#[component]
fn TextField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id.clone() class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="text"
                class="input input-bordered w-full"
                required=required
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn NumberField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id.clone() class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="number"
                min="0"
                required
                class="input input-bordered w-full"
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// 商品字段组
///
/// `disabled` 为 true 时所有输入只读（详情页的查看模式）。
#[component]
pub fn ProductFields(
    state: FormState,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
    /// 元素 id 前缀，避免同页多个表单冲突
    #[prop(into)]
    prefix: String,
) -> impl IntoView {
    let id = move |field: &str| format!("{}-{}", prefix, field);

    view! {
        <TextField id=id("name") label="Product Name" value=state.name disabled=disabled required=true />
        <TextField id=id("sku") label="SKU" value=state.sku disabled=disabled required=true />
        <NumberField id=id("stock") label="Stock" value=state.stock disabled=disabled />
        <TextField id=id("location") label="Location" value=state.shelf_location disabled=disabled />
        <NumberField id=id("minimum-stock") label="Minimum Stock" value=state.minimum_stock disabled=disabled />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_trimmed_request() {
        let req = build_request(" Bolt ", "B-1", "12", " A-03 ", "4").unwrap();
        assert_eq!(req.name, "Bolt");
        assert_eq!(req.stock, 12);
        assert_eq!(req.shelf_location.as_deref(), Some("A-03"));
        assert_eq!(req.minimum_stock, 4);
    }

    #[test]
    fn empty_location_is_omitted() {
        let req = build_request("Bolt", "B-1", "0", "  ", "0").unwrap();
        assert_eq!(req.shelf_location, None);
    }

    #[test]
    fn rejects_missing_and_invalid_fields() {
        assert_eq!(
            build_request("", "B-1", "1", "", "0").unwrap_err(),
            "Product name is required"
        );
        assert_eq!(
            build_request("Bolt", "B-1", "-1", "", "0").unwrap_err(),
            "Stock cannot be negative"
        );
        assert_eq!(
            build_request("Bolt", "B-1", "3", "", "x").unwrap_err(),
            "Minimum stock must be a whole number"
        );
    }
}
