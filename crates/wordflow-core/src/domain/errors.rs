//! Errors - エラー型
//!
//! ユニット内のエラー（`CountError`）はユニット境界で `FailureReason` に変換され、
//! dispatch の呼び出し元にはデータとして返る。ここにあるのはその手前の型だけ。

use thiserror::Error;

use super::state::DispatchState;

/// CountError は 1 行の処理中に起きるエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    #[error("input line must not be null")]
    InvalidInput,
}

/// StateError は dispatch の状態機械に対する不正な遷移
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal dispatch transition: {event} in state {from:?}")]
pub struct StateError {
    pub from: DispatchState,
    pub event: &'static str,
}
