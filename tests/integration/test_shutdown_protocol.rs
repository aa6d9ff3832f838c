// 停止ハンドシェイクの統合テスト
use crate::fixtures::{CountingKitchen, RecordingRunReporter};
use async_trait::async_trait;
use pizzeria::{
    engine::{spawn_producer, ShutdownState},
    services::{DefaultPizzeriaConfig, ScriptedKitchen},
    Kitchen, KitchenOutcome, PipelineError, PizzeriaEngine, ProductionLimit,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const ACK_TIMEOUT: Duration = Duration::from_millis(500);

#[tokio::test]
async fn test_data_channel_closed_once_shutdown_returns() {
    let kitchen = Arc::new(CountingKitchen::new(
        KitchenOutcome::Ready,
        Duration::from_millis(100),
    ));
    let mut producer = spawn_producer(
        Arc::clone(&kitchen),
        ProductionLimit::new(10).unwrap(),
        ACK_TIMEOUT,
    );

    let first = producer.recv().await.unwrap();
    let second = producer.recv().await.unwrap();
    assert_eq!(first.sequence_number(), 1);
    assert_eq!(second.sequence_number(), 2);

    // 3件目の調理中に停止を要求する
    timeout(Duration::from_secs(1), producer.shutdown())
        .await
        .expect("acknowledgement should arrive in bounded time")
        .unwrap();

    assert_eq!(producer.state(), ShutdownState::Stopped);
    assert!(producer.recv().await.is_none());
    producer.join(ACK_TIMEOUT).await.unwrap();

    // 停止後に新しい注文は作られない
    let prepared = kitchen.prepared.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(kitchen.prepared.lock().unwrap().len(), prepared);
}

#[tokio::test]
async fn test_second_shutdown_is_rejected() {
    let kitchen = Arc::new(ScriptedKitchen::always(KitchenOutcome::Ready));
    let mut producer = spawn_producer(kitchen, ProductionLimit::new(2).unwrap(), ACK_TIMEOUT);

    producer.recv().await.unwrap();
    producer.shutdown().await.unwrap();

    let second = producer.shutdown().await;
    assert!(matches!(second, Err(PipelineError::AlreadyStopped)));
    assert_eq!(producer.state(), ShutdownState::Stopped);
}

#[tokio::test]
async fn test_producer_keeps_sending_sentinels_until_stopped() {
    let kitchen = Arc::new(ScriptedKitchen::always(KitchenOutcome::Ready));
    let mut producer = spawn_producer(kitchen, ProductionLimit::new(2).unwrap(), ACK_TIMEOUT);

    let numbers: Vec<_> = [
        producer.recv().await.unwrap(),
        producer.recv().await.unwrap(),
        producer.recv().await.unwrap(),
        producer.recv().await.unwrap(),
    ]
    .iter()
    .map(|item| (item.sequence_number(), item.is_sentinel()))
    .collect();

    assert_eq!(numbers, vec![(1, false), (2, false), (3, true), (4, true)]);

    producer.shutdown().await.unwrap();
    assert!(producer.recv().await.is_none());
}

/// 指定した注文番号で調理中にパニックするキッチン
struct CollapsingKitchen {
    collapse_at: u64,
}

#[async_trait]
impl Kitchen for CollapsingKitchen {
    async fn prepare(&self, order_number: u64) -> KitchenOutcome {
        if order_number == self.collapse_at {
            panic!("oven exploded");
        }
        KitchenOutcome::Ready
    }
}

#[tokio::test]
async fn test_engine_reports_channel_closed_without_summary() {
    let reporter = RecordingRunReporter::new();
    let engine = PizzeriaEngine::new(
        CollapsingKitchen { collapse_at: 3 },
        DefaultPizzeriaConfig::new(5).with_ack_timeout(ACK_TIMEOUT),
        reporter.clone(),
    );

    let error = engine.run().await.unwrap_err();

    assert!(matches!(
        error,
        PipelineError::ChannelClosedUnexpectedly { received: 2 }
    ));
    assert_eq!(reporter.sequence_numbers(), vec![1, 2]);
    assert!(reporter.summaries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_engine_rejects_invalid_stop_after() {
    let reporter = RecordingRunReporter::new();
    let engine = PizzeriaEngine::new(
        ScriptedKitchen::always(KitchenOutcome::Ready),
        DefaultPizzeriaConfig::new(3).with_stop_after(Some(4)),
        reporter.clone(),
    );

    let error = engine.run().await.unwrap_err();

    assert!(matches!(error, PipelineError::Configuration { .. }));
    assert!(reporter.opened.lock().unwrap().is_none());
}
