//! ResultSink port - 最終結果の報告先
//!
//! 報告は観測用途なので、シグネチャ自体が失敗を返さない。
//! 実装は自分の I/O エラーをログに残して握りつぶす。

use crate::domain::{Aggregate, DispatchId};

/// ResultSink は dispatch の終端。ここから先に何かを dispatch することはない。
pub trait ResultSink: Send + Sync {
    fn report(&self, dispatch: DispatchId, aggregate: &Aggregate);
}
