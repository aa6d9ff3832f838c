// キッチンの具象実装

use crate::core::{Kitchen, KitchenOutcome};
use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// 出目の範囲（0..12）
const ROLL_SIDES: u32 = 12;
/// 調理時間の最大単位数
const MAX_DELAY_UNITS: u32 = 5;

/// 乱数で調理時間と成否を決めるキッチン
///
/// 出目が2以下なら材料切れ、4以下ならコックが辞め、それ以外は完成。
/// 調理時間は1〜5単位。
#[derive(Debug)]
pub struct RandomKitchen {
    delay_unit: Duration,
    rng: Mutex<StdRng>,
}

impl RandomKitchen {
    pub fn new(delay_unit: Duration) -> Self {
        Self {
            delay_unit,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 再現可能な乱数列を使う
    pub fn with_seed(delay_unit: Duration, seed: u64) -> Self {
        Self {
            delay_unit,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// 出目を結果に分類
    pub fn classify_roll(roll: u32) -> KitchenOutcome {
        match roll {
            0..=2 => KitchenOutcome::OutOfIngredients,
            3..=4 => KitchenOutcome::CookQuit,
            _ => KitchenOutcome::Ready,
        }
    }

    fn roll(&self) -> (u32, u32) {
        // ロックはawaitをまたがない
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let delay_units = rng.gen_range(1..=MAX_DELAY_UNITS);
        let roll = rng.gen_range(0..ROLL_SIDES);
        (delay_units, roll)
    }
}

impl Default for RandomKitchen {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Kitchen for RandomKitchen {
    async fn prepare(&self, order_number: u64) -> KitchenOutcome {
        let (delay_units, roll) = self.roll();
        let delay = self.delay_unit * delay_units;

        tracing::debug!(order = order_number, delay_ms = delay.as_millis() as u64, "making pizza");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Self::classify_roll(roll)
    }
}

/// 決められた順に結果を返すキッチン
///
/// 台本を使い切った後は最後の結果を繰り返す。台本が空なら常に完成。
#[derive(Debug, Clone, Default)]
pub struct ScriptedKitchen {
    script: Vec<KitchenOutcome>,
    delay: Duration,
}

impl ScriptedKitchen {
    pub fn new(script: Vec<KitchenOutcome>) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
        }
    }

    /// 常に同じ結果を返すキッチン
    pub fn always(outcome: KitchenOutcome) -> Self {
        Self::new(vec![outcome])
    }

    /// 1件ごとの調理時間を設定
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `ready,quit,out` 形式の文字列から作成
    pub fn parse(script: &str) -> crate::core::PipelineResult<Self> {
        let outcomes = script
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(KitchenOutcome::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(outcomes))
    }

    fn outcome_for(&self, order_number: u64) -> KitchenOutcome {
        let index = order_number.saturating_sub(1) as usize;
        self.script
            .get(index)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or(KitchenOutcome::Ready)
    }
}

#[async_trait]
impl Kitchen for ScriptedKitchen {
    async fn prepare(&self, order_number: u64) -> KitchenOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome_for(order_number)
    }
}
