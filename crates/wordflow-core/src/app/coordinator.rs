//! Coordinator - dispatch のライフサイクルを持つドライバ
//!
//! dispatcher を 1 つ保持し、入力テキストを渡して結果を ResultSink まで流す。
//! テキストの取得元（ファイル・stdin など）はここでは扱わない。

use tracing::info;

use super::dispatcher::{Dispatch, LineDispatcher};
use crate::domain::{Aggregate, TextBlock};

pub struct Coordinator {
    dispatcher: LineDispatcher,
}

impl Coordinator {
    pub fn new(dispatcher: LineDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &LineDispatcher {
        &self.dispatcher
    }

    pub async fn run(&self, text: &str) -> Aggregate {
        self.run_block(TextBlock::split(text)).await.aggregate
    }

    pub async fn run_lines<I>(&self, lines: I) -> Aggregate
    where
        I: IntoIterator<Item = Option<String>>,
    {
        self.run_block(TextBlock::from_lines(lines)).await.aggregate
    }

    /// 行ごとの結果も欲しいとき用
    pub async fn run_block(&self, block: TextBlock) -> Dispatch {
        info!(lines = block.len(), "starting dispatch");
        let dispatch = self.dispatcher.dispatch(block).await;
        info!(id = %dispatch.id, aggregate = %dispatch.aggregate, "dispatch finished");
        dispatch
    }
}
