//! 消息类型定义

use serde::{Deserialize, Serialize};

use crate::board::Side;

/// 会话 ID（仅用于日志标注）
pub type SessionId = u64;

/// 对局模式（握手时由客户端选择）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 玩家对战
    PvP,
    /// 人机对战
    PvE,
}

/// 座位号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    /// 1 号位（执红先行）
    One,
    /// 2 号位（执黄）
    Two,
}

impl Seat {
    /// 座位对应的棋子颜色
    pub fn side(&self) -> Side {
        match self {
            Seat::One => Side::Red,
            Seat::Two => Side::Yellow,
        }
    }

    /// 座位编号（1 或 2）
    pub fn number(&self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

/// 每手棋之后的对局状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 对局继续
    Continue,
    /// 红方连四获胜
    RedWin,
    /// 黄方连四获胜
    YellowWin,
    /// 满盘平局
    Draw,
}

impl GameStatus {
    /// 指定颜色获胜对应的状态码
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::Red => GameStatus::RedWin,
            Side::Yellow => GameStatus::YellowWin,
        }
    }

    /// 是否为终局状态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Continue)
    }
}

/// 客户端发送给服务端的消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    /// 握手：选择对局模式（连接建立后的第一条消息）
    Join { mode: GameMode },
    /// 在指定列落子
    DropPiece { column: u8 },
}

/// 服务端发送给客户端的消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// 握手回应：分配座位
    SeatAssigned { seat: Seat },
    /// 对局开始
    GameStarted { your_side: Side },
    /// 落子非法，重新输入（不消耗回合）
    InvalidMove { column: u8 },
    /// 一次有效落子的结果：落点 + 落子后的状态码
    MoveMade {
        side: Side,
        column: u8,
        row: u8,
        status: GameStatus,
    },
}
