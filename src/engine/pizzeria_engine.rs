// PizzeriaEngine - 依存性注入による生産・消費エンジン
// キッチン、設定、レポーターをコンストラクタで受け取り、1回分の営業を実行する

use super::{
    consumer::{consume, StopCondition},
    producer::spawn_producer,
};
use crate::core::{
    Kitchen, PipelineError, PipelineResult, PizzeriaConfig, ProductionLimit, RunReporter,
    RunSummary,
};
use chrono::Utc;
use std::sync::Arc;

/// 依存性注入によるピザ屋エンジン
///
/// キッチンは生産タスクと共有されるため Arc で保持する。
pub struct PizzeriaEngine<K, C, R> {
    kitchen: Arc<K>,
    config: C,
    reporter: R,
}

impl<K, C, R> PizzeriaEngine<K, C, R>
where
    K: Kitchen + 'static,
    C: PizzeriaConfig,
    R: RunReporter,
{
    /// 新しいエンジンを作成（コンストラクタインジェクション）
    pub fn new(kitchen: K, config: C, reporter: R) -> Self {
        Self {
            kitchen: Arc::new(kitchen),
            config,
            reporter,
        }
    }

    /// 1回分の営業を実行し、集計と評価を返す
    ///
    /// プロトコル違反が起きた場合は集計を報告せずにエラーを返す。
    pub async fn run(&self) -> PipelineResult<RunSummary> {
        let condition = self.validate_config()?;
        let limit = condition.limit;
        let ack_timeout = self.config.ack_timeout();

        let opened_at = Utc::now();
        tracing::info!(limit = limit.get(), stop_after = ?condition.stop_after, "pizzeria opened");
        self.reporter.report_opened(limit.get()).await;

        let mut producer = spawn_producer(Arc::clone(&self.kitchen), limit, ack_timeout);
        let tally = consume(&mut producer, condition, &self.reporter, ack_timeout).await?;

        let summary = RunSummary::new(limit, tally, opened_at, Utc::now());
        tracing::info!(
            completed = tally.completed,
            failed = tally.failed,
            attempted = tally.attempted,
            verdict = ?summary.verdict,
            "pizzeria closed"
        );
        self.reporter.report_summary(&summary).await;

        Ok(summary)
    }

    /// 設定の検証
    fn validate_config(&self) -> PipelineResult<StopCondition> {
        let limit = ProductionLimit::new(self.config.production_limit())?;

        if self.config.ack_timeout().is_zero() {
            return Err(PipelineError::configuration(
                "確認応答の待機時間は0より大きい必要があります",
            ));
        }

        if let Some(stop_after) = self.config.stop_after() {
            if stop_after == 0 || stop_after > limit.get() {
                return Err(PipelineError::configuration(format!(
                    "早期停止件数は1以上{limit}以下である必要があります: {stop_after}"
                )));
            }
        }

        Ok(StopCondition {
            limit,
            stop_after: self.config.stop_after(),
        })
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
