//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **WordCounter**: 本番用の LineHandler
//! - **TracingSink / ConsoleSink / MemorySink**: ResultSink
//! - **NoopObserver / TracingObserver / RecordingObserver**: DispatchObserver

pub mod observers;
pub mod sinks;
pub mod word_counter;

pub use self::observers::{NoopObserver, RecordingObserver, TracingObserver};
pub use self::sinks::{ConsoleSink, MemorySink, OutputFormat, TracingSink};
pub use self::word_counter::WordCounter;
