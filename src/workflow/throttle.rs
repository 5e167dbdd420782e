use std::time::Duration;
use tokio::time::sleep;

/// 翻页之间的固定延迟策略
///
/// 生产环境每页之间等待约 1 秒；测试使用 `Throttle::none()`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
}

impl Throttle {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// 不等待
    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn wait(&self) {
        if !self.interval.is_zero() {
            sleep(self.interval).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}
