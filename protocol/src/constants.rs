//! 协议常量定义

use std::time::Duration;

/// 协议版本号
pub const PROTOCOL_VERSION: u8 = 1;

/// 棋盘行数
pub const BOARD_ROWS: usize = 6;

/// 棋盘列数
pub const BOARD_COLS: usize = 7;

/// 获胜所需连子数
pub const WIN_LENGTH: usize = 4;

/// 最大落子数（棋盘格子总数，达到且无人获胜即为平局）
pub const MAX_MOVES: u32 = (BOARD_ROWS * BOARD_COLS) as u32;

/// 消息帧最大大小
pub const MAX_FRAME_SIZE: usize = 4096;

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 服务端默认监听地址
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:9527";

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
