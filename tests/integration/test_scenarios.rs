// 営業シナリオの統合テスト
use crate::fixtures::{mixed_script, CountingKitchen, RecordingRunReporter};
use pizzeria::{
    services::{DefaultPizzeriaConfig, RandomKitchen, ScriptedKitchen},
    KitchenOutcome, PizzeriaEngine, RunTally, Verdict,
};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_single_order_always_succeeds() {
    let reporter = RecordingRunReporter::new();
    let engine = PizzeriaEngine::new(
        ScriptedKitchen::always(KitchenOutcome::Ready),
        DefaultPizzeriaConfig::new(1),
        reporter.clone(),
    );

    let summary = engine.run().await.unwrap();

    assert_eq!(
        summary.tally,
        RunTally {
            completed: 1,
            failed: 0,
            attempted: 1
        }
    );
    assert_eq!(summary.verdict, Verdict::Great);
    assert_eq!(*reporter.opened.lock().unwrap(), Some(1));
    assert_eq!(*reporter.closing.lock().unwrap(), vec![2]);
    assert_eq!(reporter.summaries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ten_failures_is_an_awful_day() {
    let reporter = RecordingRunReporter::new();
    let engine = PizzeriaEngine::new(
        ScriptedKitchen::new(vec![KitchenOutcome::OutOfIngredients, KitchenOutcome::CookQuit]),
        DefaultPizzeriaConfig::new(10),
        reporter.clone(),
    );

    let summary = engine.run().await.unwrap();

    assert_eq!(
        summary.tally,
        RunTally {
            completed: 0,
            failed: 10,
            attempted: 10
        }
    );
    assert_eq!(summary.verdict, Verdict::Awful);
    assert_eq!(summary.verdict_message, "It was an awful day!");
}

#[tokio::test]
async fn test_six_failures_is_not_a_very_good_day() {
    let engine = PizzeriaEngine::new(
        ScriptedKitchen::new(mixed_script(6, 4)),
        DefaultPizzeriaConfig::new(10),
        RecordingRunReporter::new(),
    );

    let summary = engine.run().await.unwrap();

    assert_eq!(summary.tally.completed, 4);
    assert_eq!(summary.tally.failed, 6);
    assert_eq!(summary.verdict, Verdict::NotVeryGood);
}

#[tokio::test]
async fn test_stop_mid_stream_after_three_orders() {
    let reporter = RecordingRunReporter::new();
    let kitchen = CountingKitchen::new(KitchenOutcome::Ready, Duration::from_millis(20));
    let prepared = kitchen.prepared.clone();
    let engine = PizzeriaEngine::new(
        kitchen,
        DefaultPizzeriaConfig::new(10)
            .with_stop_after(Some(3))
            .with_ack_timeout(Duration::from_millis(500)),
        reporter.clone(),
    );

    let summary = timeout(Duration::from_secs(2), engine.run())
        .await
        .expect("shutdown should complete in bounded time")
        .unwrap();

    assert_eq!(summary.tally.attempted, 3);
    assert_eq!(summary.tally.completed, 3);
    assert!(summary.stopped_early);
    assert_eq!(reporter.sequence_numbers(), vec![1, 2, 3]);
    assert_eq!(*reporter.closing.lock().unwrap(), vec![3]);
    // 停止後に調理が始まることはない（4件目が途中まで進んでいることはある）
    assert!(prepared.lock().unwrap().len() <= 4);
}

#[tokio::test]
async fn test_random_runs_keep_tally_invariants() {
    for seed in 0..8u64 {
        for limit in [1u64, 5, 12] {
            let reporter = RecordingRunReporter::new();
            let engine = PizzeriaEngine::new(
                RandomKitchen::with_seed(Duration::ZERO, seed),
                DefaultPizzeriaConfig::new(limit),
                reporter.clone(),
            );

            let summary = engine.run().await.unwrap();
            let tally = summary.tally;

            assert_eq!(tally.attempted, limit);
            assert_eq!(tally.completed + tally.failed, tally.attempted);
            assert_eq!(summary.verdict, Verdict::from_failures(tally.failed));

            // 番号は1から連続して増加し、重複しない
            let numbers = reporter.sequence_numbers();
            assert_eq!(numbers, (1..=limit).collect::<Vec<_>>());

            let items = reporter.items.lock().unwrap();
            let succeeded = items.iter().filter(|item| item.succeeded()).count() as u64;
            assert_eq!(succeeded, tally.completed);
        }
    }
}
