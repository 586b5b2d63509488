//! 各页面共用的界面组件

pub mod bar_chart;
pub mod icons;
pub mod modal;
pub mod pagination;
pub mod summary_card;
pub mod toast;

pub use bar_chart::BarChart;
pub use modal::Modal;
pub use pagination::Pagination;
pub use summary_card::{CardVariant, SummaryCard, SummaryCardSkeleton};
pub use toast::{ToastContext, ToastHost, failure_message, use_toast};
