//! ResultSink の実装
//!
//! - **TracingSink**: tracing にログとして出す
//! - **ConsoleSink**: 任意の `Write` に結果だけを書く（CLI 用）
//! - **MemorySink**: 受け取った結果を保持する（テスト・組み込み用）

use std::io::Write;
use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::domain::{Aggregate, DispatchId};
use crate::ports::ResultSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn report(&self, dispatch: DispatchId, aggregate: &Aggregate) {
        match aggregate {
            Aggregate::Total { words } => {
                info!(%dispatch, words, "the text has a total number of {words} words");
            }
            Aggregate::Failed { reason } => {
                error!(%dispatch, %reason, "word count failed");
            }
        }
    }
}

/// ConsoleSink の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 合計だけ（`6`）または `error: <reason>`
    #[default]
    Plain,
    /// `Aggregate` の JSON 1 行
    Json,
}

/// ConsoleSink は結果を 1 行で書き出す
///
/// 書き込みに失敗しても panic せず、warn ログを残すだけ。
pub struct ConsoleSink<W> {
    out: Mutex<W>,
    format: OutputFormat,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(out),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, aggregate: &Aggregate) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Plain => Ok(aggregate.to_string()),
            OutputFormat::Json => serde_json::to_string(aggregate),
        }
    }
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write + Send> ResultSink for ConsoleSink<W> {
    fn report(&self, dispatch: DispatchId, aggregate: &Aggregate) {
        let line = match self.render(aggregate) {
            Ok(line) => line,
            Err(e) => {
                warn!(%dispatch, "failed to render aggregate: {e}");
                return;
            }
        };

        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!(%dispatch, "failed to write aggregate: {e}");
        }
    }
}

/// MemorySink は報告された結果を順に保持する
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(DispatchId, Aggregate)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(DispatchId, Aggregate)> {
        match self.reports.lock() {
            Ok(r) => r.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Aggregate> {
        self.reports().pop().map(|(_, a)| a)
    }
}

impl ResultSink for MemorySink {
    fn report(&self, dispatch: DispatchId, aggregate: &Aggregate) {
        let mut reports = match self.reports.lock() {
            Ok(r) => r,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((dispatch, aggregate.clone()));
    }
}
