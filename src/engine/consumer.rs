// Consumer - 注文の受信・集計と停止のトリガー

use super::producer::Producer;
use crate::core::{PipelineError, PipelineResult, ProductionLimit, RunReporter, RunTally};
use std::time::Duration;

/// 消費ループの停止条件
#[derive(Debug, Clone, Copy)]
pub struct StopCondition {
    pub limit: ProductionLimit,
    /// この件数を処理したら上限前でも停止する
    pub stop_after: Option<u64>,
}

impl StopCondition {
    pub fn at_limit(limit: ProductionLimit) -> Self {
        Self {
            limit,
            stop_after: None,
        }
    }

    fn reached_early(&self, tally: &RunTally) -> bool {
        self.stop_after
            .is_some_and(|stop_after| tally.attempted >= stop_after)
    }
}

/// データチャンネルが閉じるまで注文を受け取り、集計する
///
/// 番兵（上限超えの番号）を受け取るか早期停止条件に達したら、
/// 停止要求を出して確認応答を待つ。停止要求の前にチャンネルが
/// 閉じた場合は `ChannelClosedUnexpectedly` を返す。
pub async fn consume<R>(
    producer: &mut Producer,
    condition: StopCondition,
    reporter: &R,
    join_timeout: Duration,
) -> PipelineResult<RunTally>
where
    R: RunReporter + ?Sized,
{
    let mut tally = RunTally::default();
    let mut received: u64 = 0;
    let mut last_sequence: u64 = 0;
    let mut stop_requested = false;

    while let Some(item) = producer.recv().await {
        received += 1;
        debug_assert!(item.sequence_number() > last_sequence);
        last_sequence = item.sequence_number();

        if condition.limit.admits(item.sequence_number()) {
            tally.record(&item);
            tracing::debug!(
                order = item.sequence_number(),
                succeeded = item.succeeded(),
                "order processed"
            );
            reporter.report_item(&item).await;

            if condition.reached_early(&tally) {
                tracing::info!(attempted = tally.attempted, "stopping early");
                reporter.report_closing(item.sequence_number()).await;
                producer.shutdown().await?;
                stop_requested = true;
            }
        } else {
            tracing::info!(order = item.sequence_number(), "sentinel observed");
            reporter.report_closing(item.sequence_number()).await;
            producer.shutdown().await?;
            stop_requested = true;
        }
    }

    if !stop_requested {
        tracing::error!(received, "data channel closed before shutdown was requested");
        return Err(PipelineError::ChannelClosedUnexpectedly { received });
    }

    producer.join(join_timeout).await?;
    Ok(tally)
}
