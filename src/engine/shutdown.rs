// Shutdown - 停止要求と確認応答の二段階ハンドシェイク
//
// コンシューマが確認応答用のoneshotを作って制御チャンネルで送り、
// プロデューサはデータチャンネルを閉じてから応答する。
// 応答を受け取った時点でデータ側は完全に停止している。

use super::rendezvous::RendezvousReceiver;
use crate::core::{PipelineError, PipelineResult, ShutdownStage};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

/// 停止要求。確認応答は一度だけ送られる
#[derive(Debug)]
pub struct ShutdownRequest {
    ack: oneshot::Sender<()>,
}

impl ShutdownRequest {
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (ack, ack_rx) = oneshot::channel();
        (Self { ack }, ack_rx)
    }

    /// 停止完了を通知する
    ///
    /// 呼び出し前にデータチャンネルを閉じておくこと。
    pub fn acknowledge(self) {
        // 要求側が待機を諦めていても問題ない
        let _ = self.ack.send(());
    }
}

/// ハンドシェイクの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// 生産・受信ともに自由
    Running,
    /// 停止要求を送信し、確認応答を待っている
    StopRequested,
    /// 停止完了（終端）
    Stopped,
}

/// コンシューマ側の停止調整役
///
/// 停止要求を出せるのはこの構造体だけで、要求は1回に限られる。
#[derive(Debug)]
pub struct ShutdownCoordinator {
    control_tx: mpsc::Sender<ShutdownRequest>,
    state: ShutdownState,
    ack_timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(control_tx: mpsc::Sender<ShutdownRequest>, ack_timeout: Duration) -> Self {
        Self {
            control_tx,
            state: ShutdownState::Running,
            ack_timeout,
        }
    }

    pub fn state(&self) -> ShutdownState {
        self.state
    }

    /// プロデューサに停止を要求し、確認応答まで待つ
    ///
    /// 2回目以降の呼び出しは何も送らず `AlreadyStopped` を返す。
    pub async fn request_stop<T>(&mut self, data: &RendezvousReceiver<T>) -> PipelineResult<()> {
        if self.state != ShutdownState::Running {
            tracing::warn!(state = ?self.state, "duplicate shutdown request ignored");
            return Err(PipelineError::AlreadyStopped);
        }

        self.state = ShutdownState::StopRequested;
        let result = self.handshake(data).await;
        // 違反時も再入させない
        self.state = ShutdownState::Stopped;

        match &result {
            Ok(()) => tracing::info!("producer acknowledged shutdown"),
            Err(e) => tracing::error!(stage = e.stage(), error = %e, "shutdown handshake failed"),
        }
        result
    }

    async fn handshake<T>(&self, data: &RendezvousReceiver<T>) -> PipelineResult<()> {
        let (request, ack_rx) = ShutdownRequest::new();

        tracing::debug!("sending shutdown request");
        self.control_tx.send(request).await.map_err(|_| {
            PipelineError::protocol_violation(
                ShutdownStage::Request,
                "プロデューサが制御チャンネルを閉じています",
            )
        })?;

        match timeout(self.ack_timeout, ack_rx).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                return Err(PipelineError::protocol_violation(
                    ShutdownStage::Acknowledgement,
                    "確認応答が送られないまま破棄されました",
                ));
            }
            Err(_) => {
                return Err(PipelineError::protocol_violation(
                    ShutdownStage::Acknowledgement,
                    format!("{}ms以内に確認応答がありません", self.ack_timeout.as_millis()),
                ));
            }
        }

        // 応答はデータチャンネルの閉鎖後にしか来ない
        if !data.is_closed() {
            return Err(PipelineError::protocol_violation(
                ShutdownStage::DataChannel,
                "確認応答後もデータチャンネルが開いています",
            ));
        }

        Ok(())
    }
}
