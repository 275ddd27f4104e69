//! WordCounter - 1 行の語数を数える LineHandler
//!
//! 空白で区切り、空でないトークンだけを数える。状態を持たないので
//! 1 つのインスタンスを全ユニットで共有しても干渉しない。

use async_trait::async_trait;

use crate::domain::CountError;
use crate::ports::LineHandler;

#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl WordCounter {
    pub fn new() -> Self {
        Self
    }

    /// 同期版の本体
    pub fn count(line: Option<&str>) -> Result<usize, CountError> {
        let line = line.ok_or(CountError::InvalidInput)?;
        Ok(line.split_whitespace().count())
    }
}

#[async_trait]
impl LineHandler for WordCounter {
    async fn handle(&self, line: Option<&str>) -> Result<usize, CountError> {
        Self::count(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::sentence("this is a text", 4)]
    #[case::empty("", 0)]
    #[case::only_spaces("   ", 0)]
    #[case::tabs_and_runs("\tLorem   Ipsum\t dolor ", 3)]
    #[case::leading_space(" It has survived not only five centuries, but also the leap", 11)]
    #[case::punctuation_is_part_of_word("industry's standard-dummy text.", 3)]
    fn counts_non_empty_tokens(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(WordCounter::count(Some(line)), Ok(expected));
    }

    #[test]
    fn null_line_is_invalid_input() {
        let err = WordCounter::count(None).unwrap_err();
        assert_eq!(err, CountError::InvalidInput);
        assert_eq!(err.to_string(), "input line must not be null");
    }

    #[tokio::test]
    async fn handler_delegates_to_count() {
        let counter = WordCounter::new();
        assert_eq!(counter.handle(Some("this is a text")).await, Ok(4));
        assert!(counter.handle(None).await.is_err());
    }
}
