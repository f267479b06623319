//! 错误类型定义

use thiserror::Error;

/// 棋盘规则错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// 列号越界
    #[error("Column out of range: {column}")]
    ColumnOutOfRange { column: u8 },

    /// 该列已满
    #[error("Column is full: {column}")]
    ColumnFull { column: u8 },

    /// 该列为空（撤销时无子可撤）
    #[error("Column is empty: {column}")]
    ColumnEmpty { column: u8 },

    /// 没有任何合法落子（仅在满盘时可能发生）
    #[error("No valid moves available")]
    NoValidMoves,
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误（bincode）
    #[error("Bincode serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// 协议版本不匹配
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    /// 帧大小超限
    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,

    /// 收到了当前状态不期望的消息
    #[error("Unexpected message: {context}")]
    UnexpectedMessage { context: &'static str },

    /// 棋盘规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
