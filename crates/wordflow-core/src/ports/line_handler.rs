//! LineHandler port - 1 行分の作業単位
//!
//! dispatcher は行ごとにこの trait のインスタンスを 1 回だけ呼び出す。
//! 実装は行をまたいだ可変状態を持ってはいけない（ユニット同士はロックなしで並行実行される）。

use async_trait::async_trait;

use crate::domain::CountError;

/// LineHandler は 1 行から語数を計算する
///
/// # 使用例
/// ```ignore
/// struct Upper;
///
/// #[async_trait]
/// impl LineHandler for Upper {
///     async fn handle(&self, line: Option<&str>) -> Result<usize, CountError> {
///         let line = line.ok_or(CountError::InvalidInput)?;
///         Ok(line.split_whitespace().filter(|w| w.chars().all(char::is_uppercase)).count())
///     }
/// }
/// ```
#[async_trait]
pub trait LineHandler: Send + Sync + 'static {
    async fn handle(&self, line: Option<&str>) -> Result<usize, CountError>;
}
