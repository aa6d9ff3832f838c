// パイプラインで使用される型定義

use super::error::{PipelineError, PipelineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// キッチンが1件の注文に対して返す結果の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitchenOutcome {
    /// ピザが完成した
    Ready,
    /// 材料切れ
    OutOfIngredients,
    /// 調理中にコックが辞めた
    CookQuit,
}

impl KitchenOutcome {
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// 注文番号に対する説明メッセージ
    pub fn message(&self, order_number: u64) -> String {
        match self {
            Self::Ready => format!("Pizza order #{order_number} is ready"),
            Self::OutOfIngredients => {
                format!("*** We ran out of ingredients for pizza #{order_number}")
            }
            Self::CookQuit => format!("*** The cook quit while making pizza #{order_number}"),
        }
    }

    /// `ready` / `out` / `quit` 形式の文字列から変換（CLIのスクリプト指定用）
    pub fn parse(value: &str) -> PipelineResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ready" | "ok" => Ok(Self::Ready),
            "out" | "out_of_ingredients" => Ok(Self::OutOfIngredients),
            "quit" | "cook_quit" => Ok(Self::CookQuit),
            other => Err(PipelineError::configuration(format!(
                "不明なキッチン結果です: {other}"
            ))),
        }
    }
}

/// 生産された1件の作業（ピザ注文）
///
/// 構築後は不変。コンシューマが部分的な状態を観測することはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    sequence_number: u64,
    outcome_message: String,
    succeeded: bool,
    outcome: Option<KitchenOutcome>,
}

impl WorkItem {
    /// キッチンの結果から注文を作成
    pub fn prepared(sequence_number: u64, outcome: KitchenOutcome) -> Self {
        Self {
            sequence_number,
            outcome_message: outcome.message(sequence_number),
            succeeded: outcome.succeeded(),
            outcome: Some(outcome),
        }
    }

    /// 生産上限を超えた番号を持つ番兵アイテム
    pub fn sentinel(sequence_number: u64) -> Self {
        Self {
            sequence_number,
            outcome_message: String::new(),
            succeeded: false,
            outcome: None,
        }
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn outcome_message(&self) -> &str {
        &self.outcome_message
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn outcome(&self) -> Option<KitchenOutcome> {
        self.outcome
    }

    pub fn is_sentinel(&self) -> bool {
        self.outcome.is_none()
    }
}

/// 1回の実行で生産する注文数の上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ProductionLimit(u64);

impl ProductionLimit {
    pub fn new(limit: u64) -> PipelineResult<Self> {
        if limit == 0 {
            return Err(PipelineError::configuration(
                "注文数は1以上である必要があります",
            ));
        }
        Ok(Self(limit))
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// 番号が上限内かどうか
    pub const fn admits(&self, sequence_number: u64) -> bool {
        sequence_number <= self.0
    }
}

impl TryFrom<u64> for ProductionLimit {
    type Error = PipelineError;

    fn try_from(value: u64) -> PipelineResult<Self> {
        Self::new(value)
    }
}

impl From<ProductionLimit> for u64 {
    fn from(limit: ProductionLimit) -> Self {
        limit.0
    }
}

impl fmt::Display for ProductionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 実行中の集計（コンシューマのみが所有・更新する）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub completed: u64,
    pub failed: u64,
    pub attempted: u64,
}

impl RunTally {
    /// 受信した注文1件を記録
    pub fn record(&mut self, item: &WorkItem) {
        self.attempted += 1;
        if item.succeeded() {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_failures(self.failed)
    }
}

/// 失敗数から導かれる1日の評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Great,
    PrettyGood,
    Ok,
    NotVeryGood,
    Awful,
}

impl Verdict {
    pub const fn from_failures(failed: u64) -> Self {
        match failed {
            f if f > 9 => Self::Awful,
            f if f >= 6 => Self::NotVeryGood,
            f if f >= 4 => Self::Ok,
            f if f >= 2 => Self::PrettyGood,
            _ => Self::Great,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            Self::Great => "It was a great day!!!",
            Self::PrettyGood => "It was a pretty good day!",
            Self::Ok => "It was an ok day...",
            Self::NotVeryGood => "It was not a very good day...",
            Self::Awful => "It was an awful day!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 実行結果のサマリー
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub limit: u64,
    pub tally: RunTally,
    pub verdict: Verdict,
    pub verdict_message: String,
    /// 上限到達前に停止したかどうか
    pub stopped_early: bool,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn new(
        limit: ProductionLimit,
        tally: RunTally,
        opened_at: DateTime<Utc>,
        closed_at: DateTime<Utc>,
    ) -> Self {
        let verdict = tally.verdict();
        let elapsed_ms = (closed_at - opened_at).num_milliseconds().max(0) as u64;
        Self {
            limit: limit.get(),
            tally,
            verdict,
            verdict_message: verdict.message().to_string(),
            stopped_early: tally.attempted < limit.get(),
            opened_at,
            closed_at,
            elapsed_ms,
        }
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::internal(e.into()))
    }
}
