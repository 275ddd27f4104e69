//! Events - dispatch 中に発生するイベント
//!
//! `DispatchObserver` に渡される。計算そのものとは独立しており、
//! 観測しなくても結果は変わらない。

use super::ids::{DispatchId, LineIndex};
use super::outcome::LineResult;
use super::state::DispatchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    StateChanged {
        dispatch: DispatchId,
        from: DispatchState,
        to: DispatchState,
    },
    UnitSpawned {
        dispatch: DispatchId,
        index: LineIndex,
    },
    UnitCompleted {
        dispatch: DispatchId,
        result: LineResult,
    },
}

impl DispatchEvent {
    pub fn dispatch(&self) -> DispatchId {
        match self {
            Self::StateChanged { dispatch, .. }
            | Self::UnitSpawned { dispatch, .. }
            | Self::UnitCompleted { dispatch, .. } => *dispatch,
        }
    }
}
