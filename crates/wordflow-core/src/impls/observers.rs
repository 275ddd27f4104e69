//! DispatchObserver の実装

use std::sync::Mutex;

use tracing::debug;

use crate::domain::{DispatchEvent, LineOutcome};
use crate::ports::DispatchObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

/// TracingObserver はユニットの生成・完了と状態遷移を debug ログに出す
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn on_event(&self, event: &DispatchEvent) {
        match event {
            DispatchEvent::StateChanged { dispatch, from, to } => {
                debug!(%dispatch, ?from, ?to, "dispatch state changed");
            }
            DispatchEvent::UnitSpawned { dispatch, index } => {
                debug!(%dispatch, unit = %index.unit_name(), "starting unit");
            }
            DispatchEvent::UnitCompleted { dispatch, result } => match &result.outcome {
                LineOutcome::Count { words } => {
                    debug!(%dispatch, unit = %result.index.unit_name(), words, "unit replied");
                }
                LineOutcome::Failed { reason } => {
                    debug!(%dispatch, unit = %result.index.unit_name(), %reason, "unit failed");
                }
            },
        }
    }
}

/// RecordingObserver は受け取ったイベントを保持する
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DispatchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        match self.events.lock() {
            Ok(e) => e.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DispatchObserver for RecordingObserver {
    fn on_event(&self, event: &DispatchEvent) {
        let mut events = match self.events.lock() {
            Ok(e) => e,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
