// パイプライン専用のカスタムエラー型定義
// 業務上の失敗（ピザ作りの失敗）はエラーではなく集計対象なので、ここには含めない

use std::fmt;
use thiserror::Error;

/// シャットダウンハンドシェイクのどの段階で違反が起きたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStage {
    /// 制御チャンネルへの停止要求の送信
    Request,
    /// 確認応答の待機
    Acknowledgement,
    /// 確認応答後のデータチャンネル閉鎖確認
    DataChannel,
}

impl ShutdownStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Acknowledgement => "acknowledgement",
            Self::DataChannel => "data_channel",
        }
    }
}

impl fmt::Display for ShutdownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("シャットダウンプロトコル違反 ({stage}): {message}")]
    ShutdownProtocolViolation {
        stage: ShutdownStage,
        message: String,
    },

    #[error("シャットダウンは既に要求済みです")]
    AlreadyStopped,

    #[error("停止要求前にデータチャンネルが閉じられました (受信済み: {received}件)")]
    ChannelClosedUnexpectedly { received: u64 },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("タスクエラー: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// プロトコル違反エラーの作成
    pub fn protocol_violation(stage: ShutdownStage, message: impl Into<String>) -> Self {
        Self::ShutdownProtocolViolation {
            stage,
            message: message.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::Internal { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ShutdownProtocolViolation { .. } | Self::ChannelClosedUnexpectedly { .. } => {
                ErrorSeverity::Critical
            }
            Self::AlreadyStopped => ErrorSeverity::Low,
            Self::Configuration { .. } => ErrorSeverity::High,
            Self::Task { .. } => ErrorSeverity::High,
            Self::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// プロトコル違反はプログラムの誤りを示すため回復不能として扱う
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ShutdownProtocolViolation { .. } | Self::ChannelClosedUnexpectedly { .. } => {
                false
            }
            Self::AlreadyStopped => true,
            Self::Configuration { .. } => false,
            Self::Task { .. } => false,
            Self::Internal { .. } => false,
        }
    }

    /// 失敗した段階の名前（実行レポート用）
    pub fn stage(&self) -> &'static str {
        match self {
            Self::ShutdownProtocolViolation { stage, .. } => stage.as_str(),
            Self::AlreadyStopped => "shutdown",
            Self::ChannelClosedUnexpectedly { .. } => "consume",
            Self::Configuration { .. } => "configuration",
            Self::Task { .. } => "producer_task",
            Self::Internal { .. } => "internal",
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - 実行停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

impl From<anyhow::Error> for PipelineError {
    fn from(error: anyhow::Error) -> Self {
        PipelineError::Internal { source: error }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::Task { source: error }
    }
}
