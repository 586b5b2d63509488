//! 入库 / 出库柱状图
//!
//! 纯 SVG 绘制。几何计算与渲染分离，前者可在原生环境下测试。

use leptos::prelude::*;
use wms_shared::DashboardChart;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 300.0;
const PAD_LEFT: f64 = 44.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 36.0;
const TICKS: i64 = 4;

const INBOUND_FILL: &str = "rgba(255, 99, 132, 0.5)";
const OUTBOUND_FILL: &str = "rgba(53, 162, 235, 0.5)";

/// 不小于 `n` 的 1 / 2 / 5 × 10^k
fn nice_step(n: i64) -> i64 {
    let n = n.max(1);
    let mut magnitude = 1;
    while magnitude * 10 <= n {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= n)
        .unwrap_or(10 * magnitude)
}

/// 纵轴上限：`TICKS` 等分且每格为整齐数值
pub fn axis_max(peak: i64) -> i64 {
    let per_tick = (peak.max(0) + TICKS - 1) / TICKS;
    nice_step(per_tick) * TICKS
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub label_x: f64,
    pub inbound: BarRect,
    pub outbound: BarRect,
}

fn plot_height() -> f64 {
    HEIGHT - PAD_TOP - PAD_BOTTOM
}

fn baseline() -> f64 {
    HEIGHT - PAD_BOTTOM
}

/// 计算每个标签下的两根柱子；序列长度不一致时缺失值按 0 处理
pub fn layout(chart: &DashboardChart) -> Vec<BarGroup> {
    let count = chart.labels.len();
    if count == 0 {
        return Vec::new();
    }

    let max = axis_max(chart.peak()) as f64;
    let slot = (WIDTH - PAD_LEFT - PAD_RIGHT) / count as f64;
    let bar_width = slot * 0.35;

    let rect = |x: f64, value: i64| {
        let height = value.max(0) as f64 / max * plot_height();
        BarRect {
            x,
            y: baseline() - height,
            width: bar_width,
            height,
            value,
        }
    };

    chart
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let left = PAD_LEFT + slot * i as f64 + slot * 0.15;
            let inbound = chart.inbound_stock.get(i).copied().unwrap_or(0);
            let outbound = chart.outbound_stock.get(i).copied().unwrap_or(0);
            BarGroup {
                label: label.clone(),
                label_x: PAD_LEFT + slot * (i as f64 + 0.5),
                inbound: rect(left, inbound),
                outbound: rect(left + bar_width, outbound),
            }
        })
        .collect()
}

/// 纵轴刻度：(数值, y 坐标)
pub fn ticks(peak: i64) -> Vec<(i64, f64)> {
    let max = axis_max(peak);
    (0..=TICKS)
        .map(|i| {
            let value = max / TICKS * i;
            let y = baseline() - plot_height() * i as f64 / TICKS as f64;
            (value, y)
        })
        .collect()
}

fn bar_view(bar: BarRect, fill: &'static str, series: &'static str) -> impl IntoView {
    view! {
        <rect x=bar.x y=bar.y width=bar.width height=bar.height fill=fill data-series=series data-value=bar.value></rect>
    }
}

#[component]
pub fn BarChart(#[prop(into)] data: Signal<DashboardChart>, #[prop(into)] title: Signal<String>) -> impl IntoView {
    let view_box = format!("0 0 {} {}", WIDTH, HEIGHT);

    view! {
        <div class="w-full">
            <div class="flex items-center justify-between mb-2">
                <h3 class="font-semibold">{move || title.get()}</h3>
                <div class="flex gap-4 text-xs">
                    <span class="flex items-center gap-1">
                        <span class="inline-block w-3 h-3 rounded-sm" style={format!("background:{}", INBOUND_FILL)}></span>
                        "Inbound Stock"
                    </span>
                    <span class="flex items-center gap-1">
                        <span class="inline-block w-3 h-3 rounded-sm" style={format!("background:{}", OUTBOUND_FILL)}></span>
                        "Outbound Stock"
                    </span>
                </div>
            </div>
            {move || {
                let chart = data.get();
                if chart.labels.is_empty() {
                    return view! {
                        <div class="h-64 flex items-center justify-center text-sm text-base-content/50">
                            "No data for this period"
                        </div>
                    }
                    .into_any();
                }

                let grid = ticks(chart.peak())
                    .into_iter()
                    .map(|(value, y)| {
                        view! {
                            <line x1=PAD_LEFT x2={WIDTH - PAD_RIGHT} y1=y y2=y stroke="currentColor" stroke-opacity="0.1" />
                            <text x={PAD_LEFT - 6.0} y={y + 4.0} text-anchor="end" font-size="11" fill="currentColor">
                                {value}
                            </text>
                        }
                    })
                    .collect_view();

                let bars = layout(&chart)
                    .into_iter()
                    .map(|group| {
                        view! {
                            <g>
                                {bar_view(group.inbound, INBOUND_FILL, "Inbound Stock")}
                                {bar_view(group.outbound, OUTBOUND_FILL, "Outbound Stock")}
                                <text x=group.label_x y={HEIGHT - PAD_BOTTOM + 18.0} text-anchor="middle" font-size="11" fill="currentColor">
                                    {group.label}
                                </text>
                            </g>
                        }
                    })
                    .collect_view();

                view! {
                    <svg class="w-full h-auto" viewBox={view_box.clone()} role="img">
                        {grid}
                        {bars}
                    </svg>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(labels: &[&str], inbound: &[i64], outbound: &[i64]) -> DashboardChart {
        DashboardChart {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            inbound_stock: inbound.to_vec(),
            outbound_stock: outbound.to_vec(),
        }
    }

    #[test]
    fn axis_rounds_up_to_even_ticks() {
        assert_eq!(axis_max(0), 4);
        assert_eq!(axis_max(8), 8);
        assert_eq!(axis_max(9), 20);
        assert_eq!(axis_max(37), 40);
        assert_eq!(axis_max(180), 200);
    }

    #[test]
    fn tallest_bar_fits_the_plot() {
        let groups = layout(&chart(&["Mon", "Tue"], &[4, 8], &[2, 0]));
        assert_eq!(groups.len(), 2);

        let tallest = &groups[1].inbound;
        assert_eq!(tallest.value, 8);
        assert!((tallest.height - plot_height()).abs() < 1e-9);
        assert!((tallest.y - PAD_TOP).abs() < 1e-9);

        assert_eq!(groups[1].outbound.height, 0.0);
        assert!(groups[0].outbound.x > groups[0].inbound.x);
    }

    #[test]
    fn short_series_are_padded_with_zero() {
        let groups = layout(&chart(&["W1", "W2", "W3"], &[5], &[]));
        assert_eq!(groups[2].inbound.value, 0);
        assert_eq!(groups[2].outbound.value, 0);
    }

    #[test]
    fn empty_chart_has_no_bars() {
        assert!(layout(&DashboardChart::default()).is_empty());
        assert_eq!(ticks(0).first().map(|t| t.0), Some(0));
        assert_eq!(ticks(0).last().map(|t| t.0), Some(4));
    }
}
