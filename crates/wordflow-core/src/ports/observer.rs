//! DispatchObserver port - dispatch のライフサイクルフック
//!
//! ユニットの生成・完了や状態遷移のたびに呼ばれる。
//! 計算とは切り離されており、デフォルト実装は何もしない。

use crate::domain::DispatchEvent;

pub trait DispatchObserver: Send + Sync {
    fn on_event(&self, _event: &DispatchEvent) {}
}
