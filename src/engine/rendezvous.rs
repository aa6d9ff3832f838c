// Rendezvous - 容量ゼロのチャンネル
//
// tokioのmpscは容量1以上しか作れないため、受信側が「受け取り枠」(oneshot) を
// 送信側へ渡し、送信側がその枠を埋める需要駆動方式で受け渡しを同期させる。
// 送信は受信側が recv() で待っているときにしか成立しない。

use tokio::sync::{mpsc, oneshot};

/// 容量ゼロのチャンネルを作成
pub fn channel<T>() -> (RendezvousSender<T>, RendezvousReceiver<T>) {
    // 受信側は &mut self で1件ずつしか要求しないため、需要キューは1で足りる
    let (demand_tx, demand_rx) = mpsc::channel(1);
    (
        RendezvousSender { demand_rx },
        RendezvousReceiver { demand_tx },
    )
}

/// 送信側。ドロップするとチャンネルが閉じる
#[derive(Debug)]
pub struct RendezvousSender<T> {
    demand_rx: mpsc::Receiver<oneshot::Sender<T>>,
}

/// 受信側が待機中であることを示す送信許可
#[derive(Debug)]
pub struct Permit<T> {
    slot: oneshot::Sender<T>,
}

impl<T> RendezvousSender<T> {
    /// 受信側が待機するまで待つ
    ///
    /// キャンセル安全なので `tokio::select!` の分岐に使える。
    /// 受信側が全て破棄された場合は None。
    pub async fn reserve(&mut self) -> Option<Permit<T>> {
        self.demand_rx.recv().await.map(|slot| Permit { slot })
    }

    /// 値を受け渡す（受信側が受け取るまで待つ）
    ///
    /// 受信側が閉じている場合は値を返却する。
    pub async fn send(&mut self, mut value: T) -> Result<(), T> {
        loop {
            let Some(permit) = self.reserve().await else {
                return Err(value);
            };
            match permit.send(value) {
                Ok(()) => return Ok(()),
                // 受信側が recv() を途中で諦めた。次の要求を待つ
                Err(returned) => value = returned,
            }
        }
    }

    /// チャンネルを閉じる
    pub fn close(self) {
        drop(self);
    }
}

impl<T> Permit<T> {
    /// 値を受け渡す。受信側が待機を中断していた場合は値を返却する
    pub fn send(self, value: T) -> Result<(), T> {
        self.slot.send(value)
    }
}

/// 受信側
#[derive(Debug)]
pub struct RendezvousReceiver<T> {
    demand_tx: mpsc::Sender<oneshot::Sender<T>>,
}

impl<T> RendezvousReceiver<T> {
    /// 次の値を受け取る。送信側が閉じた場合は None
    pub async fn recv(&mut self) -> Option<T> {
        let (slot_tx, slot_rx) = oneshot::channel();
        if self.demand_tx.send(slot_tx).await.is_err() {
            return None;
        }
        // 送信側が受け取り枠を埋めずに破棄した場合もチャンネル終了として扱う
        slot_rx.await.ok()
    }

    /// 送信側が閉じているかどうか
    pub fn is_closed(&self) -> bool {
        self.demand_tx.is_closed()
    }
}
