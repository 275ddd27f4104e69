//! LineDispatcher - 行ごとのファンアウト/ファンイン
//!
//! # フロー
//! 1. テキストを行に分割（TextBlock）
//! 2. 行ごとにユニットを `tokio::spawn` し、oneshot で 1 回だけ応答させる
//! 3. 各ユニットには spawn 時点で締め切りを決める（他のユニットの遅れで延びない）
//! 4. 応答・失敗・タイムアウトのどれかで全行ぶんの LineResult が揃うまで待つ
//! 5. Aggregator で畳み込み、ResultSink に渡してから呼び出し元にも返す
//!
//! ユニット内のエラーは LineResult::Failed に変換されるので、
//! `process` が失敗を `Err` や panic として返すことはない。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::oneshot;
use tokio::time::{self, Instant};
use tracing::{Instrument, debug, info_span, warn};

use super::aggregator::Aggregator;
use crate::domain::{
    Aggregate, DispatchEvent, DispatchId, DispatchState, FailureReason, LineResult, LineTask,
    StateError, TextBlock,
};
use crate::ports::{DispatchObserver, LineHandler, ResultSink};

/// Dispatch は 1 回分の結果
///
/// `results` は行番号順に並び、行ごとにちょうど 1 件ある。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub id: DispatchId,
    pub results: Vec<LineResult>,
    pub aggregate: Aggregate,
}

pub struct LineDispatcher {
    handler: Arc<dyn LineHandler>,
    sink: Arc<dyn ResultSink>,
    observer: Arc<dyn DispatchObserver>,
    unit_timeout: Duration,
}

impl LineDispatcher {
    pub fn new(
        handler: Arc<dyn LineHandler>,
        sink: Arc<dyn ResultSink>,
        observer: Arc<dyn DispatchObserver>,
        unit_timeout: Duration,
    ) -> Self {
        Self {
            handler,
            sink,
            observer,
            unit_timeout,
        }
    }

    pub fn unit_timeout(&self) -> Duration {
        self.unit_timeout
    }

    /// テキストを処理して Aggregate を返す
    pub async fn process(&self, text: &str) -> Aggregate {
        self.dispatch(TextBlock::split(text)).await.aggregate
    }

    /// 行を直接与えて処理する（`None` は欠損行）
    pub async fn process_lines<I>(&self, lines: I) -> Aggregate
    where
        I: IntoIterator<Item = Option<String>>,
    {
        self.dispatch(TextBlock::from_lines(lines)).await.aggregate
    }

    /// 1 回分の dispatch を実行し、行ごとの結果も含めて返す
    pub async fn dispatch(&self, block: TextBlock) -> Dispatch {
        let id = DispatchId::generate();
        let span = info_span!("dispatch", %id, lines = block.len());
        self.run(id, block).instrument(span).await
    }

    async fn run(&self, id: DispatchId, block: TextBlock) -> Dispatch {
        let mut state = Tracker::new(id, self.observer.as_ref());
        state.advance(DispatchState::on_start);

        let lines = block.len();
        state.advance(|s| s.on_split(lines));

        let mut pending: FuturesUnordered<_> = block
            .into_tasks()
            .map(|task| self.spawn_unit(id, task))
            .collect();

        // 行番号ごとのスロットと、観測順の結果
        let mut slots: Vec<Option<LineResult>> = vec![None; lines];
        let mut observed = Vec::with_capacity(lines);

        while let Some(result) = pending.next().await {
            state.advance(DispatchState::on_reply);
            self.observer.on_event(&DispatchEvent::UnitCompleted {
                dispatch: id,
                result: result.clone(),
            });

            let slot = &mut slots[result.index.get()];
            debug_assert!(slot.is_none(), "duplicate reply for {}", result.index);
            *slot = Some(result.clone());
            observed.push(result);
        }

        let aggregate = Aggregator::fold(&observed);
        state.advance(DispatchState::on_aggregated);
        debug!(%aggregate, "collected {} replies", observed.len());

        self.sink.report(id, &aggregate);
        state.advance(DispatchState::on_reported);

        Dispatch {
            id,
            results: slots.into_iter().flatten().collect(),
            aggregate,
        }
    }

    /// ユニットを 1 つ起動し、その応答を待つ future を返す
    ///
    /// ユニット自体は spawn 済みなので、返した future を poll しなくても計算は進む。
    /// 締め切りは spawn した時点で確定する。
    fn spawn_unit(&self, dispatch: DispatchId, task: LineTask) -> impl Future<Output = LineResult> {
        let LineTask { index, line } = task;
        let timeout = self.unit_timeout;
        let deadline = deadline_after(Instant::now(), timeout);

        let (reply_tx, reply_rx) = oneshot::channel();
        let handler = Arc::clone(&self.handler);
        let worker = tokio::spawn(async move {
            let reply = handler.handle(line.as_deref()).await;
            // 締め切り後は受信側がいないので送信失敗は無視
            let _ = reply_tx.send(reply);
        });
        self.observer
            .on_event(&DispatchEvent::UnitSpawned { dispatch, index });

        async move {
            match time::timeout_at(deadline, reply_rx).await {
                Ok(Ok(reply)) => LineResult::from_reply(index, reply),
                Ok(Err(_)) => {
                    // 応答せずに sender が drop された
                    let message = match worker.await {
                        Err(e) if e.is_panic() => "unit panicked",
                        Err(_) => "unit was cancelled",
                        Ok(()) => "unit exited without replying",
                    };
                    warn!(unit = %index.unit_name(), "{message}");
                    LineResult::failed(index, FailureReason::unit_lost(message))
                }
                Err(_) => {
                    worker.abort();
                    warn!(unit = %index.unit_name(), ?timeout, "unit timed out");
                    LineResult::failed(index, FailureReason::timeout(timeout))
                }
            }
        }
    }
}

/// 実質的に「期限なし」として扱う上限（約 30 年）
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + timeout`。オーバーフローする場合は FAR_FUTURE で頭打ちにする
fn deadline_after(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// 状態遷移を observer に通知しながら追跡する
struct Tracker<'a> {
    dispatch: DispatchId,
    current: DispatchState,
    observer: &'a dyn DispatchObserver,
}

impl<'a> Tracker<'a> {
    fn new(dispatch: DispatchId, observer: &'a dyn DispatchObserver) -> Self {
        Self {
            dispatch,
            current: DispatchState::Idle,
            observer,
        }
    }

    fn advance(&mut self, step: impl FnOnce(DispatchState) -> Result<DispatchState, StateError>) {
        match step(self.current) {
            Ok(next) => {
                self.observer.on_event(&DispatchEvent::StateChanged {
                    dispatch: self.dispatch,
                    from: self.current,
                    to: next,
                });
                self.current = next;
            }
            Err(e) => warn!(dispatch = %self.dispatch, "{e}"),
        }
    }
}
