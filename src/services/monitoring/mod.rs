// 実行結果の表示機能
// 開店、注文ごとの結果、閉店時の集計と評価

pub mod implementations;

// 公開API
pub use implementations::{ConsoleRunReporter, NoOpRunReporter};
