use leptos::prelude::*;

pub fn has_prev(page: u32) -> bool {
    page > 1
}

pub fn has_next(page: u32, total_pages: u32) -> bool {
    page < total_pages
}

/// 分页栏：总页数为 0 时不显示
#[component]
pub fn Pagination(page: RwSignal<u32>, #[prop(into)] total_pages: Signal<u32>) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 0 }>
            <div class="flex justify-between items-center p-4 border-t border-base-200 text-sm">
                <button
                    class="btn btn-sm btn-outline"
                    disabled=move || !has_prev(page.get())
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Prev"
                </button>
                <span>{move || format!("Page {} of {}", page.get(), total_pages.get())}</span>
                <button
                    class="btn btn-sm btn-outline"
                    disabled=move || !has_next(page.get(), total_pages.get())
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_disable_the_buttons() {
        assert!(!has_prev(1));
        assert!(has_prev(2));
        assert!(has_next(1, 3));
        assert!(!has_next(3, 3));
        assert!(!has_next(1, 0));
    }
}
