// コマンドライン経由の実行テスト
use clap::Parser;
use pizzeria::cli::{execute_run, Cli};
use pizzeria::Verdict;
use tempfile::TempDir;

#[tokio::test]
async fn test_run_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pizzeria.json");
    std::fs::write(
        &path,
        r#"{"production_limit": 5, "stop_after": 2, "delay_unit_ms": 0}"#,
    )
    .unwrap();

    let cli = Cli::parse_from([
        "pizzeria",
        "--config",
        path.to_str().unwrap(),
        "--script",
        "ready",
        "--quiet",
    ]);
    let summary = execute_run(&cli).await.unwrap();

    assert_eq!(summary.limit, 5);
    assert_eq!(summary.tally.attempted, 2);
    assert!(summary.stopped_early);
    assert_eq!(summary.verdict, Verdict::Great);
}

#[tokio::test]
async fn test_run_rejects_zero_orders() {
    let cli = Cli::parse_from(["pizzeria", "--orders", "0", "--script", "ready", "--quiet"]);
    assert!(execute_run(&cli).await.is_err());
}
