//! Text - 入力テキストと行タスク
//!
//! `TextBlock` は dispatch 開始時に一度だけ作られ、以後は変更されない。
//! `LineTask` は 1 行分の作業単位で、ちょうど 1 つのユニットに move される。

use super::ids::LineIndex;

/// TextBlock は行の順序付き列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<Option<String>>,
}

impl TextBlock {
    /// テキストを `'\n'` で分割する
    ///
    /// - 空文字列は 0 行
    /// - 行末の `'\r'` は取り除く（CRLF 入力向け）
    pub fn split(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let lines = text
            .split('\n')
            .map(|line| Some(line.strip_suffix('\r').unwrap_or(line).to_string()))
            .collect();

        Self { lines }
    }

    /// 行をプログラムから直接与える
    ///
    /// `None` の行は欠損として扱われ、その行のユニットは `InvalidInput` で失敗する。
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: LineIndex) -> Option<Option<&str>> {
        self.lines.get(index.get()).map(|l| l.as_deref())
    }

    /// 各行を `LineTask` に変換する（TextBlock 自体は消費する）
    pub fn into_tasks(self) -> impl ExactSizeIterator<Item = LineTask> {
        self.lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| LineTask {
                index: LineIndex::new(i),
                line,
            })
    }
}

/// LineTask は 1 行とその位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTask {
    pub index: LineIndex,
    pub line: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", 0)]
    #[case::single("Lorem Ipsum is simply dummy text", 1)]
    #[case::two("a b\nc", 2)]
    #[case::trailing_newline("a\n", 2)]
    #[case::only_newline("\n", 2)]
    #[case::crlf("a\r\nb\r\n", 3)]
    fn split_produces_expected_line_count(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(TextBlock::split(text).len(), expected);
    }

    #[test]
    fn split_strips_carriage_returns() {
        let block = TextBlock::split("one two\r\nthree");
        assert_eq!(block.line(LineIndex::new(0)), Some(Some("one two")));
        assert_eq!(block.line(LineIndex::new(1)), Some(Some("three")));
        assert_eq!(block.line(LineIndex::new(2)), None);
    }

    #[test]
    fn tasks_carry_stable_indices() {
        let tasks: Vec<LineTask> = TextBlock::split("x\ny\nz").into_tasks().collect();
        let indices: Vec<usize> = tasks.iter().map(|t| t.index.get()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(tasks[1].line.as_deref(), Some("y"));
    }

    #[test]
    fn from_lines_keeps_missing_lines() {
        let block = TextBlock::from_lines(vec![Some("a".to_string()), None]);
        assert_eq!(block.len(), 2);
        assert_eq!(block.line(LineIndex::new(1)), Some(None));
    }
}
