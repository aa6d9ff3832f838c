// 作業生成機能
// 注文ごとの調理時間と成否の決定

pub mod implementations;

// 公開API
pub use implementations::{RandomKitchen, ScriptedKitchen};
