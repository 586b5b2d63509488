use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 单个请求的序号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 请求序号发放器
///
/// 同一数据源被反复请求时（切换图表周期、翻页、搜索），只有最后发出的
/// 请求结果会被应用，先发后到的响应直接丢弃。
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发出新请求前调用，之前发放的序号随即失效
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// 仅当序号仍是最新时执行 `apply`，返回是否已应用
    pub fn apply_if_current<T>(&self, ticket: Ticket, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current(ticket) {
            apply(value);
            true
        } else {
            log::debug!("dropping stale response #{}", ticket.0);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_applies() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        let mut applied = Vec::new();
        // 第二个请求先返回
        assert!(seq.apply_if_current(second, "weekly", |v| applied.push(v)));
        // 第一个请求后返回，被丢弃
        assert!(!seq.apply_if_current(first, "daily", |v| applied.push(v)));
        assert_eq!(applied, ["weekly"]);
    }

    #[test]
    fn clones_share_the_counter() {
        let seq = RequestSequencer::new();
        let clone = seq.clone();
        let ticket = seq.issue();
        assert!(clone.is_current(ticket));
        clone.issue();
        assert!(!seq.is_current(ticket));
    }
}
