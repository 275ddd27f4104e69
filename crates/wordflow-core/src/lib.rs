//! wordflow-core
//!
//! テキストを行に分けて行ごとに並行に語数を数え、合計を報告するパイプライン。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, text, outcome, state, errors, events）
//! - **ports**: 抽象化レイヤー（LineHandler, ResultSink, DispatchObserver）
//! - **app**: アプリケーションロジック（dispatcher, aggregator, coordinator, builder）
//! - **impls**: 実装（WordCounter, 各種 sink / observer）
//! - **config**: DispatchConfig

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use self::app::{Coordinator, CoordinatorBuilder, LineDispatcher};
pub use self::config::DispatchConfig;
pub use self::domain::{Aggregate, FailureReason, LineResult};
