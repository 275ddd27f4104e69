//! State - 1 回の dispatch の状態
//!
//! # 状態遷移
//! ```text
//! Idle -> Splitting -> Dispatching{pending=N} -> Collecting{pending=k} -> Aggregated -> Reported
//! ```
//! - 最初の応答（またはタイムアウト）で Dispatching -> Collecting
//! - pending が 0 になったときだけ Aggregated へ進める
//! - 0 行のときは Dispatching{pending=0} から直接 Aggregated
//! - リトライはない（失敗・タイムアウトした行も消化済みとして数える）

use serde::Serialize;

use super::errors::StateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DispatchState {
    Idle,
    Splitting,
    Dispatching { pending: usize },
    Collecting { pending: usize },
    Aggregated,
    Reported,
}

impl DispatchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Reported)
    }

    pub fn on_start(self) -> Result<Self, StateError> {
        match self {
            Self::Idle => Ok(Self::Splitting),
            from => Err(StateError { from, event: "start" }),
        }
    }

    pub fn on_split(self, lines: usize) -> Result<Self, StateError> {
        match self {
            Self::Splitting => Ok(Self::Dispatching { pending: lines }),
            from => Err(StateError { from, event: "split" }),
        }
    }

    /// 1 ユニット分の結果（成功・失敗・タイムアウトのいずれか）を受け取った
    pub fn on_reply(self) -> Result<Self, StateError> {
        match self {
            Self::Dispatching { pending } | Self::Collecting { pending } if pending > 0 => {
                Ok(Self::Collecting {
                    pending: pending - 1,
                })
            }
            from => Err(StateError { from, event: "reply" }),
        }
    }

    pub fn on_aggregated(self) -> Result<Self, StateError> {
        match self {
            Self::Dispatching { pending: 0 } | Self::Collecting { pending: 0 } => {
                Ok(Self::Aggregated)
            }
            from => Err(StateError {
                from,
                event: "aggregate",
            }),
        }
    }

    pub fn on_reported(self) -> Result<Self, StateError> {
        match self {
            Self::Aggregated => Ok(Self::Reported),
            from => Err(StateError {
                from,
                event: "report",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle_with_two_lines() {
        let s = DispatchState::Idle.on_start().unwrap();
        assert_eq!(s, DispatchState::Splitting);

        let s = s.on_split(2).unwrap();
        assert_eq!(s, DispatchState::Dispatching { pending: 2 });

        let s = s.on_reply().unwrap();
        assert_eq!(s, DispatchState::Collecting { pending: 1 });

        // まだ pending が残っている
        assert!(s.on_aggregated().is_err());

        let s = s.on_reply().unwrap().on_aggregated().unwrap();
        assert_eq!(s, DispatchState::Aggregated);

        let s = s.on_reported().unwrap();
        assert!(s.is_terminal());
    }

    #[test]
    fn empty_dispatch_skips_collecting() {
        let s = DispatchState::Idle
            .on_start()
            .and_then(|s| s.on_split(0))
            .and_then(|s| s.on_aggregated())
            .unwrap();
        assert_eq!(s, DispatchState::Aggregated);
    }

    #[test]
    fn extra_reply_is_rejected() {
        let s = DispatchState::Collecting { pending: 0 };
        let err = s.on_reply().unwrap_err();
        assert_eq!(err.event, "reply");
        assert_eq!(err.from, s);
    }

    #[test]
    fn cannot_report_before_aggregating() {
        assert!(DispatchState::Collecting { pending: 0 }.on_reported().is_err());
        assert!(DispatchState::Idle.on_split(1).is_err());
    }
}
