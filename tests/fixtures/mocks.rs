// テスト用のレポーター・キッチン実装

use async_trait::async_trait;
use pizzeria::{Kitchen, KitchenOutcome, RunReporter, RunSummary, WorkItem};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 呼び出し内容を記録するレポーター
#[derive(Clone, Default)]
pub struct RecordingRunReporter {
    pub opened: Arc<Mutex<Option<u64>>>,
    pub items: Arc<Mutex<Vec<WorkItem>>>,
    pub closing: Arc<Mutex<Vec<u64>>>,
    pub summaries: Arc<Mutex<Vec<RunSummary>>>,
}

impl RecordingRunReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence_numbers(&self) -> Vec<u64> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(WorkItem::sequence_number)
            .collect()
    }
}

#[async_trait]
impl RunReporter for RecordingRunReporter {
    async fn report_opened(&self, limit: u64) {
        *self.opened.lock().unwrap() = Some(limit);
    }

    async fn report_item(&self, item: &WorkItem) {
        self.items.lock().unwrap().push(item.clone());
    }

    async fn report_closing(&self, sequence_number: u64) {
        self.closing.lock().unwrap().push(sequence_number);
    }

    async fn report_summary(&self, summary: &RunSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}

/// 調理回数を数えるキッチン
#[derive(Clone)]
pub struct CountingKitchen {
    outcome: KitchenOutcome,
    delay: Duration,
    pub prepared: Arc<Mutex<Vec<u64>>>,
}

impl CountingKitchen {
    pub fn new(outcome: KitchenOutcome, delay: Duration) -> Self {
        Self {
            outcome,
            delay,
            prepared: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Kitchen for CountingKitchen {
    async fn prepare(&self, order_number: u64) -> KitchenOutcome {
        tokio::time::sleep(self.delay).await;
        self.prepared.lock().unwrap().push(order_number);
        self.outcome
    }
}

/// 失敗と成功を指定数ずつ交互に並べた台本
pub fn mixed_script(failures: usize, successes: usize) -> Vec<KitchenOutcome> {
    let mut script = Vec::with_capacity(failures + successes);
    let (mut f, mut s) = (failures, successes);
    while f > 0 || s > 0 {
        if f > 0 {
            script.push(if f % 2 == 0 {
                KitchenOutcome::CookQuit
            } else {
                KitchenOutcome::OutOfIngredients
            });
            f -= 1;
        }
        if s > 0 {
            script.push(KitchenOutcome::Ready);
            s -= 1;
        }
    }
    script
}
