use leptos::prelude::*;
use leptos::task::spawn_local;
use wms_client::RequestSequencer;
use wms_shared::{ChartPeriod, DashboardChart, DashboardSummary};

use crate::auth::use_auth;
use crate::components::common::icons::{AlertTriangle, FileText, Package};
use crate::components::common::{
    BarChart, CardVariant, SummaryCard, SummaryCardSkeleton, failure_message, use_toast,
};

fn period_button_class(active: bool) -> &'static str {
    if active {
        "btn btn-sm btn-primary"
    } else {
        "btn btn-sm btn-outline"
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let summary = RwSignal::new(Option::<DashboardSummary>::None);
    let chart = RwSignal::new(DashboardChart::default());
    let period = RwSignal::new(ChartPeriod::Daily);
    let chart_loading = RwSignal::new(true);
    let sequencer = StoredValue::new(RequestSequencer::new());

    // 统计数据只在进入页面时加载一次
    spawn_local(async move {
        match auth.api().dashboard().get_summary().await {
            Ok(res) => summary.set(Some(res.data)),
            Err(e) => {
                log::error!("failed to load dashboard summary: {}", e);
                toast.error(failure_message(&e, "Failed to load dashboard data"));
            }
        }
    });

    // 周期切换时重新拉取图表；快速切换时只采用最后一次请求的结果
    Effect::new(move |_| {
        let period = period.get();
        let seq = sequencer.get_value();
        let ticket = seq.issue();
        chart_loading.set(true);

        spawn_local(async move {
            let result = auth.api().dashboard().get_chart(period).await;
            seq.apply_if_current(ticket, result, |result| {
                match result {
                    Ok(res) => chart.set(res.data),
                    Err(e) => {
                        log::error!("failed to load {} chart: {}", period.as_str(), e);
                        chart.set(DashboardChart::default());
                        toast.error(failure_message(&e, "Failed to load chart data"));
                    }
                }
                chart_loading.set(false);
            });
        });
    });

    let count = move |pick: fn(&DashboardSummary) -> u64| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(pick).unwrap_or_default()))
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70">"Welcome to your warehouse management system"</p>
            </div>

            <div class="grid gap-4 md:grid-cols-3">
                <Show
                    when=move || summary.with(Option::is_some)
                    fallback=|| view! {
                        <SummaryCardSkeleton />
                        <SummaryCardSkeleton />
                        <SummaryCardSkeleton />
                    }
                >
                    <SummaryCard
                        title="Total Products"
                        value=count(|s| s.total_products)
                        icon=view! { <Package attr:class="h-8 w-8" /> }.into_any()
                    />
                    <SummaryCard
                        title="Low Stock Items"
                        value=count(DashboardSummary::low_stock_total)
                        variant=CardVariant::Warning
                        icon=view! { <AlertTriangle attr:class="h-8 w-8" /> }.into_any()
                    />
                    <SummaryCard
                        title="Total Transactions"
                        value=count(|s| s.total_transactions)
                        icon=view! { <FileText attr:class="h-8 w-8" /> }.into_any()
                    />
                </Show>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex flex-col gap-3 sm:flex-row sm:items-center sm:justify-between">
                        <h2 class="card-title">"Transaction Overview"</h2>
                        <div class="join">
                            {ChartPeriod::ALL
                                .into_iter()
                                .map(|p| {
                                    view! {
                                        <button
                                            class=move || format!("join-item {}", period_button_class(period.get() == p))
                                            on:click=move |_| period.set(p)
                                        >
                                            {p.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="relative mt-4">
                        <Show when=move || chart_loading.get()>
                            <div class="absolute inset-0 flex items-center justify-center bg-base-100/60 z-10">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        </Show>
                        <BarChart
                            data=chart
                            title=Signal::derive(move || format!("{} Transactions", period.get().label()))
                        />
                    </div>
                </div>
            </div>
        </div>
    }
}
