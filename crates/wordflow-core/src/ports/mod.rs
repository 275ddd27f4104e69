//! Ports - 抽象化レイヤー
//!
//! dispatcher が依存する境界をここで trait として定義する。
//! - **LineHandler**: 行ごとの作業単位
//! - **ResultSink**: 集計結果の報告先
//! - **DispatchObserver**: 計装フック

pub mod line_handler;
pub mod observer;
pub mod result_sink;

pub use self::line_handler::LineHandler;
pub use self::observer::DispatchObserver;
pub use self::result_sink::ResultSink;
