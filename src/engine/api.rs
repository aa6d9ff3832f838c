// 高レベル公開API
// PizzeriaEngineを簡単に使用できるようにするための便利な関数

use super::PizzeriaEngine;
use crate::{
    core::{Kitchen, PipelineResult, PizzeriaConfig, RunReporter, RunSummary},
    services::{ConsoleRunReporter, DefaultPizzeriaConfig, NoOpRunReporter, RandomKitchen},
};

/// 設定済みエンジンで1回分の営業を実行
pub async fn run_with_engine<K, C, R>(engine: &PizzeriaEngine<K, C, R>) -> PipelineResult<RunSummary>
where
    K: Kitchen + 'static,
    C: PizzeriaConfig,
    R: RunReporter,
{
    engine.run().await
}

/// 乱数キッチンとコンソール出力を使うエンジンを作成
///
/// 調理時間の単位は設定から取る。
pub fn create_default_engine(
    config: DefaultPizzeriaConfig,
) -> PizzeriaEngine<RandomKitchen, DefaultPizzeriaConfig, ConsoleRunReporter> {
    let kitchen = RandomKitchen::new(config.delay_unit());
    PizzeriaEngine::new(kitchen, config, ConsoleRunReporter::new())
}

/// 何も表示しないエンジンを作成（JSON出力・バックグラウンド用）
pub fn create_quiet_engine<K>(
    kitchen: K,
    config: DefaultPizzeriaConfig,
) -> PizzeriaEngine<K, DefaultPizzeriaConfig, NoOpRunReporter>
where
    K: Kitchen + 'static,
{
    PizzeriaEngine::new(kitchen, config, NoOpRunReporter::new())
}
