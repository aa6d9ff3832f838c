// パイプラインのトレイト定義
// 外部協力者（キッチン、レポーター、設定）の抽象化インターフェース

use super::types::{KitchenOutcome, RunSummary, WorkItem};
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// 作業生成の抽象化トレイト
///
/// 注文番号を受け取り、結果の分類を返す。遅延や乱数源には依存しない。
#[automock]
#[async_trait]
pub trait Kitchen: Send + Sync {
    /// 指定番号の注文を調理
    async fn prepare(&self, order_number: u64) -> KitchenOutcome;
}

// Kitchen for Box<dyn Kitchen>
#[async_trait]
impl Kitchen for Box<dyn Kitchen> {
    async fn prepare(&self, order_number: u64) -> KitchenOutcome {
        self.as_ref().prepare(order_number).await
    }
}

/// 実行結果の表示を抽象化するトレイト
#[automock]
#[async_trait]
pub trait RunReporter: Send + Sync {
    /// 開店時の報告
    async fn report_opened(&self, limit: u64);

    /// 注文1件ごとの報告
    async fn report_item(&self, item: &WorkItem);

    /// 番兵を観測し、停止を要求する直前の報告
    async fn report_closing(&self, sequence_number: u64);

    /// 実行終了時の報告
    async fn report_summary(&self, summary: &RunSummary);
}

// RunReporter for Box<dyn RunReporter>
#[async_trait]
impl RunReporter for Box<dyn RunReporter> {
    async fn report_opened(&self, limit: u64) {
        self.as_ref().report_opened(limit).await
    }

    async fn report_item(&self, item: &WorkItem) {
        self.as_ref().report_item(item).await
    }

    async fn report_closing(&self, sequence_number: u64) {
        self.as_ref().report_closing(sequence_number).await
    }

    async fn report_summary(&self, summary: &RunSummary) {
        self.as_ref().report_summary(summary).await
    }
}

/// 実行設定を抽象化するトレイト
#[automock]
pub trait PizzeriaConfig: Send + Sync {
    /// 1回の実行で作る注文数
    fn production_limit(&self) -> u64;

    /// 指定件数を処理した時点で早期停止する（Noneなら上限まで）
    fn stop_after(&self) -> Option<u64>;

    /// 停止要求に対する確認応答の待機上限
    fn ack_timeout(&self) -> Duration;
}

// PizzeriaConfig for Box<dyn PizzeriaConfig>
impl PizzeriaConfig for Box<dyn PizzeriaConfig> {
    fn production_limit(&self) -> u64 {
        self.as_ref().production_limit()
    }

    fn stop_after(&self) -> Option<u64> {
        self.as_ref().stop_after()
    }

    fn ack_timeout(&self) -> Duration {
        self.as_ref().ack_timeout()
    }
}
