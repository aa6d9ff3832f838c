// 実行結果表示の具象実装

use crate::core::{RunReporter, RunSummary, WorkItem};
use async_trait::async_trait;

/// コンソール出力による実行結果の表示
#[derive(Debug, Default, Clone)]
pub struct ConsoleRunReporter {
    quiet: bool,
}

impl ConsoleRunReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn emit(&self, lines: Vec<String>) {
        if self.quiet {
            return;
        }
        for line in lines {
            println!("{line}");
        }
    }
}

pub(crate) fn opened_lines(_limit: u64) -> Vec<String> {
    vec![
        "🍕 The Pizzeria is open for business!".to_string(),
        "----------------------------------".to_string(),
    ]
}

pub(crate) fn item_lines(item: &WorkItem) -> Vec<String> {
    if item.succeeded() {
        vec![
            format!("✅ {}", item.outcome_message()),
            format!("🚚 Order #{} is out for delivery!", item.sequence_number()),
        ]
    } else {
        vec![
            format!("❌ {}", item.outcome_message()),
            "😡 The customer is really mad!".to_string(),
        ]
    }
}

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let tally = &summary.tally;
    vec![
        "-----------------".to_string(),
        "Done for the day.".to_string(),
        format!(
            "We made {} pizzas, but failed to make {}, with {} attempts in total",
            tally.completed, tally.failed, tally.attempted
        ),
        format!("📊 {}", summary.verdict.message()),
    ]
}

#[async_trait]
impl RunReporter for ConsoleRunReporter {
    async fn report_opened(&self, limit: u64) {
        self.emit(opened_lines(limit));
    }

    async fn report_item(&self, item: &WorkItem) {
        self.emit(item_lines(item));
    }

    async fn report_closing(&self, _sequence_number: u64) {
        self.emit(vec!["Done making pizzas...".to_string()]);
    }

    async fn report_summary(&self, summary: &RunSummary) {
        self.emit(summary_lines(summary));
    }
}

/// 何もしない実装（テスト・JSON出力用）
#[derive(Debug, Default, Clone)]
pub struct NoOpRunReporter;

impl NoOpRunReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunReporter for NoOpRunReporter {
    async fn report_opened(&self, _limit: u64) {
        // 何もしない
    }

    async fn report_item(&self, _item: &WorkItem) {
        // 何もしない
    }

    async fn report_closing(&self, _sequence_number: u64) {
        // 何もしない
    }

    async fn report_summary(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
