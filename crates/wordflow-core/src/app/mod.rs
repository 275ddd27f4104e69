//! App - アプリケーション層
//!
//! ports を組み合わせて dispatch を実装します。
//!
//! # 主要コンポーネント
//! - **LineDispatcher**: 行ごとにユニットを起動し、応答を集める
//! - **Aggregator**: 行ごとの結果を Aggregate に畳み込む
//! - **Coordinator**: dispatch のドライバ
//! - **CoordinatorBuilder**: ワイヤリングと起動時検証

pub mod aggregator;
pub mod builder;
pub mod coordinator;
pub mod dispatcher;

pub use self::aggregator::Aggregator;
pub use self::builder::{BuildError, CoordinatorBuilder};
pub use self::coordinator::Coordinator;
pub use self::dispatcher::{Dispatch, LineDispatcher};
