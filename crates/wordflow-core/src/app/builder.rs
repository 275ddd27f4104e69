//! CoordinatorBuilder - Coordinator の構築とワイヤリング
//!
//! 未指定の部品はデフォルトで埋める。
//! - handler: WordCounter
//! - sink: TracingSink
//! - observer: TracingObserver

use std::sync::Arc;
use std::time::Duration;

use super::coordinator::Coordinator;
use super::dispatcher::LineDispatcher;
use crate::config::DispatchConfig;
use crate::impls::{TracingObserver, TracingSink, WordCounter};
use crate::ports::{DispatchObserver, LineHandler, ResultSink};

/// # 使用例
/// ```ignore
/// let coordinator = CoordinatorBuilder::new()
///     .with_unit_timeout(Duration::from_millis(500))
///     .with_sink(Arc::new(ConsoleSink::stdout(OutputFormat::Plain)))
///     .build()?;
/// let aggregate = coordinator.run("this is a text").await;
/// ```
///
/// # Fail-fast 設計
/// - build() 時にタイムアウトが 0 なら BuildError を返す
pub struct CoordinatorBuilder {
    config: DispatchConfig,
    handler: Option<Arc<dyn LineHandler>>,
    sink: Option<Arc<dyn ResultSink>>,
    observer: Option<Arc<dyn DispatchObserver>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("unit timeout must be greater than zero")]
    ZeroTimeout,
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            config: DispatchConfig::default(),
            handler: None,
            sink: None,
            observer: None,
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_unit_timeout(timeout);
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn LineHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<Coordinator, BuildError> {
        let unit_timeout = self.config.unit_timeout();
        if unit_timeout.is_zero() {
            return Err(BuildError::ZeroTimeout);
        }

        let dispatcher = LineDispatcher::new(
            self.handler.unwrap_or_else(|| Arc::new(WordCounter)),
            self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            self.observer.unwrap_or_else(|| Arc::new(TracingObserver)),
            unit_timeout,
        );
        Ok(Coordinator::new(dispatcher))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let coordinator = CoordinatorBuilder::new().build().unwrap();
        assert_eq!(
            coordinator.dispatcher().unit_timeout(),
            Duration::from_millis(1000)
        );
    }

    #[test]
    fn test_build_with_config() {
        let coordinator = CoordinatorBuilder::new()
            .with_config(DispatchConfig { unit_timeout_ms: 25 })
            .build()
            .unwrap();
        assert_eq!(
            coordinator.dispatcher().unit_timeout(),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn test_build_zero_timeout() {
        let result = CoordinatorBuilder::new()
            .with_unit_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(BuildError::ZeroTimeout)));
    }
}
