//! ピザ屋の生産者・消費者パイプライン
//!
//! バックグラウンドのキッチンが容量ゼロのチャンネルで注文を渡し、
//! フロントが受け取って集計する。閉店はフロント側から停止要求を送り、
//! キッチンがデータチャンネルを閉じてから確認応答を返す二段階の手順で行う。

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    Kitchen, KitchenOutcome, PipelineError, PipelineResult, PizzeriaConfig, ProductionLimit,
    RunReporter, RunSummary, RunTally, Verdict, WorkItem,
};
pub use engine::PizzeriaEngine;
