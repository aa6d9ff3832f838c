// エンジン層 - 生産者・消費者パイプラインと停止ハンドシェイク
// サービス層の実装を組み合わせて1回分の営業を実行する

pub mod api;
pub mod consumer;
pub mod pizzeria_engine;
pub mod producer;
pub mod rendezvous;
pub mod shutdown;

// 公開API - 主要エンジンクラス
pub use api::{create_default_engine, create_quiet_engine, run_with_engine};
pub use consumer::{consume, StopCondition};
pub use pizzeria_engine::PizzeriaEngine;
pub use producer::{spawn_producer, Producer};
pub use shutdown::{ShutdownCoordinator, ShutdownRequest, ShutdownState};
