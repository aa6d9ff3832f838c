// 設定管理の具象実装

use crate::core::{PipelineError, PipelineResult, PizzeriaConfig};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// デフォルト設定実装
///
/// JSONファイルから読み込める。省略した項目はデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultPizzeriaConfig {
    production_limit: u64,
    stop_after: Option<u64>,
    ack_timeout_ms: u64,
    delay_unit_ms: u64,
}

impl DefaultPizzeriaConfig {
    pub fn new(production_limit: u64) -> Self {
        Self {
            production_limit,
            ..Self::default()
        }
    }

    pub fn with_production_limit(mut self, production_limit: u64) -> Self {
        self.production_limit = production_limit;
        self
    }

    pub fn with_stop_after(mut self, stop_after: Option<u64>) -> Self {
        self.stop_after = stop_after;
        self
    }

    pub fn with_ack_timeout(mut self, ack_timeout: Duration) -> Self {
        self.ack_timeout_ms = ack_timeout.as_millis() as u64;
        self
    }

    pub fn with_delay_unit(mut self, delay_unit: Duration) -> Self {
        self.delay_unit_ms = delay_unit.as_millis() as u64;
        self
    }

    /// キッチンの調理時間の単位
    pub fn delay_unit(&self) -> Duration {
        Duration::from_millis(self.delay_unit_ms)
    }

    /// JSONから設定をデシリアライズ
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        serde_json::from_str(json)
            .context("設定JSONの解析に失敗しました")
            .map_err(PipelineError::internal)
    }

    /// 設定をJSONにシリアライズ
    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self)
            .context("設定JSONの生成に失敗しました")
            .map_err(PipelineError::internal)
    }

    /// 設定ファイルを読み込む
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))
            .map_err(PipelineError::internal)?;
        Self::from_json(&json)
    }
}

impl Default for DefaultPizzeriaConfig {
    fn default() -> Self {
        Self {
            production_limit: 10,
            stop_after: None,
            ack_timeout_ms: 5_000,
            delay_unit_ms: 1_000,
        }
    }
}

impl PizzeriaConfig for DefaultPizzeriaConfig {
    fn production_limit(&self) -> u64 {
        self.production_limit
    }

    fn stop_after(&self) -> Option<u64> {
        self.stop_after
    }

    fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }
}
