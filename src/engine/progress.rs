// ==========================================
// Онтология ГРМ - 进度上报
// ==========================================
// 职责: 定义进度上报 trait，由调用方（CLI/界面）实现
// 说明: 进度仅供参考，上报不得阻断或中止处理流程
// ==========================================

use std::sync::Mutex;

// ==========================================
// 进度上报 Trait
// ==========================================

/// 进度接收者
///
/// # 参数
/// - `fraction`: 完成比例，范围 [0, 1]
/// - `message`: 可读的阶段说明
pub trait ProgressSink {
    fn report(&self, fraction: f64, message: &str);
}

/// 闭包直接作为进度接收者
impl<F> ProgressSink for F
where
    F: Fn(f64, &str),
{
    fn report(&self, fraction: f64, message: &str) {
        self(fraction, message)
    }
}

/// 空操作进度接收者
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgressSink;

impl ProgressSink for NoOpProgressSink {
    fn report(&self, fraction: f64, message: &str) {
        tracing::trace!(fraction, message, "NoOpProgressSink: 跳过进度上报");
    }
}

/// 区间映射包装
///
/// 将内部 [0, 1] 进度线性映射到外层 [offset, offset + span]
pub struct ScaledProgress<'a> {
    inner: &'a dyn ProgressSink,
    offset: f64,
    span: f64,
}

impl<'a> ScaledProgress<'a> {
    pub fn new(inner: &'a dyn ProgressSink, offset: f64, span: f64) -> Self {
        Self {
            inner,
            offset,
            span,
        }
    }
}

impl ProgressSink for ScaledProgress<'_> {
    fn report(&self, fraction: f64, message: &str) {
        let mapped = self.offset + clamp_fraction(fraction) * self.span;
        self.inner.report(clamp_fraction(mapped), message);
    }
}

/// 记录全部进度事件（测试与 JSON 输出使用）
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<(f64, String)>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(f64, String)> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, fraction: f64, message: &str) {
        // 锁中毒时丢弃事件
        if let Ok(mut guard) = self.events.lock() {
            guard.push((fraction, message.to_string()));
        }
    }
}

/// 限定在 [0, 1]，NaN 视为 0
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
