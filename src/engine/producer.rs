// Producer - 注文の生産ループ

use super::{
    rendezvous::{self, RendezvousReceiver, RendezvousSender},
    shutdown::{ShutdownCoordinator, ShutdownRequest, ShutdownState},
};
use crate::core::{Kitchen, PipelineError, PipelineResult, ProductionLimit, ShutdownStage, WorkItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// 生産タスクへのハンドル
///
/// データチャンネルの受信側と停止調整役を所有する。
/// ハンドルを破棄すると制御チャンネルが閉じ、生産タスクも終了する。
#[derive(Debug)]
pub struct Producer {
    data: RendezvousReceiver<WorkItem>,
    coordinator: ShutdownCoordinator,
    handle: Option<JoinHandle<()>>,
}

impl Producer {
    /// 次の注文を受け取る。データチャンネルが閉じていれば None
    pub async fn recv(&mut self) -> Option<WorkItem> {
        self.data.recv().await
    }

    /// 生産停止を要求し、確認応答を待つ
    pub async fn shutdown(&mut self) -> PipelineResult<()> {
        self.coordinator.request_stop(&self.data).await
    }

    pub fn state(&self) -> ShutdownState {
        self.coordinator.state()
    }

    /// 生産タスクの終了を待つ
    ///
    /// タスクがパニックしていれば `Task` エラーを返す。
    pub async fn join(&mut self, wait: Duration) -> PipelineResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        match timeout(wait, handle).await {
            Ok(result) => result.map_err(PipelineError::from),
            Err(_) => Err(PipelineError::protocol_violation(
                ShutdownStage::DataChannel,
                "停止後も生産タスクが終了しません",
            )),
        }
    }
}

/// 生産タスクを起動する
///
/// 呼び出し元をブロックせず、データ受信側と制御送信側をまとめたハンドルを返す。
pub fn spawn_producer<K>(kitchen: Arc<K>, limit: ProductionLimit, ack_timeout: Duration) -> Producer
where
    K: Kitchen + 'static,
{
    let (data_tx, data_rx) = rendezvous::channel();
    let (control_tx, control_rx) = mpsc::channel(1);

    let handle = tokio::spawn(run_kitchen(kitchen, limit, data_tx, control_rx));

    Producer {
        data: data_rx,
        coordinator: ShutdownCoordinator::new(control_tx, ack_timeout),
        handle: Some(handle),
    }
}

/// 停止要求が来るまで注文を作り続ける
///
/// 上限を超えても自分からは止まらず、番兵アイテムを送り続ける。
/// 停止の判断はコンシューマが行う。
pub(crate) async fn run_kitchen<K>(
    kitchen: Arc<K>,
    limit: ProductionLimit,
    mut data_tx: RendezvousSender<WorkItem>,
    mut control_rx: mpsc::Receiver<ShutdownRequest>,
) where
    K: Kitchen + ?Sized,
{
    let mut sequence_number: u64 = 0;

    loop {
        sequence_number += 1;

        let mut item = if limit.admits(sequence_number) {
            tracing::debug!(order = sequence_number, "received order");
            // 調理中でも停止要求に応じる
            tokio::select! {
                outcome = kitchen.prepare(sequence_number) => {
                    WorkItem::prepared(sequence_number, outcome)
                }
                request = control_rx.recv() => {
                    return close_kitchen(data_tx, request);
                }
            }
        } else {
            WorkItem::sentinel(sequence_number)
        };

        // 受け渡しと停止要求の受信を公平に競合させる
        loop {
            tokio::select! {
                permit = data_tx.reserve() => {
                    let Some(permit) = permit else {
                        tracing::debug!("consumer dropped the data channel");
                        return;
                    };
                    match permit.send(item) {
                        Ok(()) => break,
                        // 受信側が待機を中断した。同じ注文を渡し直す
                        Err(returned) => item = returned,
                    }
                }
                request = control_rx.recv() => {
                    return close_kitchen(data_tx, request);
                }
            }
        }
    }
}

/// データチャンネルを閉じてから確認応答を返す
fn close_kitchen(data_tx: RendezvousSender<WorkItem>, request: Option<ShutdownRequest>) {
    data_tx.close();
    match request {
        Some(request) => {
            request.acknowledge();
            tracing::info!("kitchen closed on request");
        }
        None => tracing::warn!("control channel closed without a shutdown request"),
    }
}
