//! Domain identifiers (strongly-typed IDs).
//!
//! - `DispatchId`: 1 回の dispatch を識別する ULID ベースの ID
//! - `LineIndex`: TextBlock 内の行位置（0 始まり）
//!
//! ## Phantom Type パターン
//! `Id<T>` のジェネリック実装に `T` をマーカーとして持たせ、
//! 将来 ID の種類が増えても取り違えをコンパイル時に防ぎます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "dispatch-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// 現在時刻ベースで新しい ID を生成
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Dispatch のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dispatch {}

impl IdMarker for Dispatch {
    fn prefix() -> &'static str {
        "dispatch-"
    }
}

/// 1 回の `process` 呼び出しを識別する ID
pub type DispatchId = Id<Dispatch>;

/// LineIndex は TextBlock 内の行位置
///
/// 集計は順序に依存しないが、どの行の結果かを追跡するために保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineIndex(usize);

impl LineIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// ログに出すユニット名（`word-counter-<i>`）
    pub fn unit_name(self) -> UnitName {
        UnitName(self)
    }
}

impl fmt::Display for LineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line-{}", self.0)
    }
}

/// UnitName は行ごとに生成されるワーカーの表示名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitName(LineIndex);

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word-counter-{}", self.0.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_ids_are_unique_and_prefixed() {
        let a = DispatchId::generate();
        let b = DispatchId::generate();

        assert_ne!(a, b);
        assert!(a.to_string().starts_with("dispatch-"));
    }

    #[test]
    fn dispatch_id_roundtrips_through_ulid() {
        let ulid = Ulid::new();
        let id = DispatchId::from(ulid);
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn line_index_display_and_unit_name() {
        let idx = LineIndex::new(3);
        assert_eq!(idx.to_string(), "line-3");
        assert_eq!(idx.unit_name().to_string(), "word-counter-3");
    }

    #[test]
    fn line_index_serializes_as_plain_number() {
        let s = serde_json::to_string(&LineIndex::new(7)).unwrap();
        assert_eq!(s, "7");
    }
}
