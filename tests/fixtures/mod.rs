// テストユーティリティとモック実装
// 統合テスト用の記録レポーターとキッチン

pub mod mocks;

// 公開API
pub use mocks::*;
