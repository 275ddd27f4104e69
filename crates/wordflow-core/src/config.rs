//! DispatchConfig - dispatcher の設定
//!
//! 外から調整できるのはユニットごとのタイムアウトだけ。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_UNIT_TIMEOUT_MS: u64 = 1000;

/// 環境変数でタイムアウトを上書きするときのキー
pub const UNIT_TIMEOUT_ENV: &str = "WORDFLOW_UNIT_TIMEOUT_MS";

/// Duration をミリ秒に変換する
///
/// 0 でない 1ms 未満の値は 1ms に切り上げ、u64 に収まらない値は `u64::MAX` で頭打ち。
pub fn duration_to_millis(d: Duration) -> u64 {
    let millis = d.as_nanos().div_ceil(1_000_000);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid unit timeout {value:?}: expected a positive number of milliseconds")]
    InvalidTimeout { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// 1 ユニットが応答するまでの待ち時間（ミリ秒）
    pub unit_timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            unit_timeout_ms: DEFAULT_UNIT_TIMEOUT_MS,
        }
    }
}

impl DispatchConfig {
    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.unit_timeout_ms = duration_to_millis(timeout);
        self
    }

    pub fn unit_timeout(&self) -> Duration {
        Duration::from_millis(self.unit_timeout_ms)
    }

    /// `WORDFLOW_UNIT_TIMEOUT_MS` があれば読み込む（なければデフォルト）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(UNIT_TIMEOUT_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            Some(raw) => Self::default().with_timeout_str(raw),
            None => Ok(Self::default()),
        }
    }

    fn with_timeout_str(mut self, raw: &str) -> Result<Self, ConfigError> {
        let ms = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| ConfigError::InvalidTimeout {
                value: raw.to_string(),
            })?;
        self.unit_timeout_ms = ms;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_timeout_is_one_second() {
        assert_eq!(DispatchConfig::default().unit_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: DispatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DispatchConfig::default());

        let cfg: DispatchConfig = serde_json::from_str(r#"{"unit_timeout_ms": 250}"#).unwrap();
        assert_eq!(cfg.unit_timeout(), Duration::from_millis(250));
    }

    #[rstest]
    #[case::exact(Duration::from_millis(250), 250)]
    #[case::sub_millisecond(Duration::from_micros(500), 1)]
    #[case::fractional(Duration::from_micros(1500), 2)]
    #[case::zero(Duration::ZERO, 0)]
    #[case::huge(Duration::from_secs(u64::MAX / 999), u64::MAX)]
    #[case::max(Duration::MAX, u64::MAX)]
    fn duration_converts_without_wrapping(#[case] d: Duration, #[case] expected: u64) {
        assert_eq!(duration_to_millis(d), expected);
    }

    #[test]
    fn sub_millisecond_timeout_stays_non_zero() {
        let cfg = DispatchConfig::default().with_unit_timeout(Duration::from_micros(500));
        assert_eq!(cfg.unit_timeout(), Duration::from_millis(1));
    }

    #[rstest]
    #[case::plain("1500", 1500)]
    #[case::padded(" 20 ", 20)]
    fn timeout_string_parses(#[case] raw: &str, #[case] expected: u64) {
        let cfg = DispatchConfig::default().with_timeout_str(raw).unwrap();
        assert_eq!(cfg.unit_timeout_ms, expected);
    }

    #[test]
    fn env_value_overrides_default_timeout() {
        assert_eq!(
            DispatchConfig::from_env_value(None).unwrap(),
            DispatchConfig::default()
        );

        let cfg = DispatchConfig::from_env_value(Some("250")).unwrap();
        assert_eq!(cfg.unit_timeout(), Duration::from_millis(250));

        assert!(DispatchConfig::from_env_value(Some("0")).is_err());
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-5")]
    #[case::garbage("soon")]
    fn timeout_string_rejects_invalid(#[case] raw: &str) {
        let err = DispatchConfig::default().with_timeout_str(raw).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                value: raw.to_string()
            }
        );
    }
}
