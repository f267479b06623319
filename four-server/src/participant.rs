//! 参与者模型
//!
//! 每个席位在会话创建时一次性确定为远程连接或本地 AI，
//! 之后不再做运行时类型判断。本地 AI 没有网络端点，
//! 广播时自然被跳过。

use four_ai::HeuristicOpponent;
use protocol::{Connection, Result, ServerMessage};

/// 会话参与者：远程玩家或本地 AI
pub enum Participant<C: Connection> {
    /// 远程玩家（持有其连接）
    Remote(C),
    /// 本地规则型 AI
    Local(HeuristicOpponent),
}

impl<C: Connection> Participant<C> {
    /// 向远程玩家发送消息；本地 AI 不收消息，直接成功
    pub async fn send(&mut self, msg: &ServerMessage) -> Result<()> {
        match self {
            Participant::Remote(conn) => conn.send(msg).await,
            Participant::Local(_) => Ok(()),
        }
    }
}
