//! 四子棋共享协议库
//!
//! 包含:
//! - 棋盘、落子引擎等核心数据结构
//! - 连四/威胁扫描
//! - 消息类型定义 (ClientMessage, ServerMessage)
//! - 传输层抽象 (Connector, Connection, Listener traits)
//! - 帧编解码 (FrameReader, FrameWriter)

mod board;
mod constants;
mod error;
mod message;
mod transport;
mod win;

pub use board::{Board, GameState, Side};
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use message::{
    ClientMessage, GameMode, GameStatus, Seat, ServerMessage, SessionId,
};
pub use transport::{
    Connection, Connector, FrameReader, FrameWriter, Listener, TcpConnection,
    TcpConnector, TcpListener,
};
pub use win::ThreatReport;
