use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Default,
    Warning,
}

impl CardVariant {
    fn value_class(self) -> &'static str {
        match self {
            CardVariant::Default => "stat-value",
            CardVariant::Warning => "stat-value text-warning",
        }
    }

    fn figure_class(self) -> &'static str {
        match self {
            CardVariant::Default => "stat-figure text-primary",
            CardVariant::Warning => "stat-figure text-warning",
        }
    }
}

/// 统计卡片：标题、数值与图标
#[component]
pub fn SummaryCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<u64>,
    #[prop(optional)] variant: CardVariant,
    icon: AnyView,
) -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow">
            <div class=variant.figure_class()>{icon}</div>
            <div class="stat-title">{title}</div>
            <div class=variant.value_class()>{move || value.get()}</div>
        </div>
    }
}

/// 加载中的占位卡片
#[component]
pub fn SummaryCardSkeleton() -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow">
            <div class="skeleton h-4 w-1/2 mb-4"></div>
            <div class="skeleton h-8 w-1/3"></div>
        </div>
    }
}
