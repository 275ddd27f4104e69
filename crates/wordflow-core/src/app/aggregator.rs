//! Aggregator - 行ごとの結果を 1 つの Aggregate に畳み込む
//!
//! 副作用なしの純粋関数。失敗が 1 つでもあれば合計は出さない。

use crate::domain::{Aggregate, LineOutcome, LineResult};

pub struct Aggregator;

impl Aggregator {
    /// 結果を畳み込む
    ///
    /// 失敗が複数ある場合は、イテレーション順で最初に現れたものを採用する。
    /// dispatcher は完了順に渡すので「最初に観測された失敗」になる。
    pub fn fold<'a, I>(results: I) -> Aggregate
    where
        I: IntoIterator<Item = &'a LineResult>,
    {
        let folded = results
            .into_iter()
            .try_fold(0usize, |acc, result| match &result.outcome {
                LineOutcome::Count { words } => Ok(acc.saturating_add(*words)),
                LineOutcome::Failed { reason } => Err(reason.clone()),
            });

        match folded {
            Ok(words) => Aggregate::Total { words },
            Err(reason) => Aggregate::Failed { reason },
        }
    }
}
