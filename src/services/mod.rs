// サービス層 - コア層トレイトの具象実装
// キッチン（作業生成）、実行結果の表示、設定管理

pub mod config;
pub mod kitchen;
pub mod monitoring;

// 公開API
pub use config::DefaultPizzeriaConfig;
pub use kitchen::{RandomKitchen, ScriptedKitchen};
pub use monitoring::{ConsoleRunReporter, NoOpRunReporter};
