//! 会话协调
//!
//! 每局对局一个 Session，独占一个 GameState，在自己的任务中
//! 顺序运行：等待当前走子方给出列号 → 校验并落子 → 向所有
//! 远程参与者播报落点与状态码 → 轮换走子方，直至终局。
//! 任一参与者断线或发来异常消息即终止本会话，不通知对端。

use tracing::{debug, info};

use protocol::{
    ClientMessage, Connection, GameState, GameStatus, ProtocolError, Result,
    ServerMessage, SessionId, Side,
};

use crate::participant::Participant;

/// 一局对局：两个参与者 + 一个棋盘引擎
pub struct Session<C: Connection> {
    id: SessionId,
    state: GameState,
    /// 下标 0 为 1 号位（红方，先行），下标 1 为 2 号位（黄方）
    participants: [Participant<C>; 2],
}

impl<C: Connection> Session<C> {
    /// 创建会话；first 执红先行
    pub fn new(id: SessionId, first: Participant<C>, second: Participant<C>) -> Self {
        Self {
            id,
            state: GameState::new(),
            participants: [first, second],
        }
    }

    /// 运行对局直至终局，返回最终状态码
    ///
    /// 读等待没有超时：参与者停止响应会使本会话无限期挂起，
    /// 这是沿用的已知限制。
    pub async fn run(mut self) -> Result<GameStatus> {
        info!(session = self.id, "对局开始");

        for (participant, side) in self.participants.iter_mut().zip([Side::Red, Side::Yellow]) {
            participant
                .send(&ServerMessage::GameStarted { your_side: side })
                .await?;
        }

        let mut mover = 0usize;
        loop {
            let side = self.state.current_turn;
            let column = self.await_move(mover).await?;

            let row = self.state.place_marker(column)?;
            let won = self.state.check_for_win(column);
            let status = if won {
                GameStatus::win_for(side)
            } else if self.state.is_draw() {
                GameStatus::Draw
            } else {
                GameStatus::Continue
            };

            debug!(session = self.id, ?side, column, row, ?status, "落子");

            let msg = ServerMessage::MoveMade { side, column, row, status };
            for participant in self.participants.iter_mut() {
                participant.send(&msg).await?;
            }

            if status.is_terminal() {
                info!(
                    session = self.id,
                    ?status,
                    moves = self.state.move_count,
                    "对局结束"
                );
                return Ok(status);
            }

            mover = 1 - mover;
        }
    }

    /// 等待指定参与者给出一个合法列号
    ///
    /// 远程玩家：循环接收 DropPiece，非法列回发 InvalidMove 后
    /// 继续等待（不消耗回合，不增加步数）。本地 AI：同步计算，
    /// 返回值保证合法。
    async fn await_move(&mut self, mover: usize) -> Result<u8> {
        let state = &mut self.state;
        match &mut self.participants[mover] {
            Participant::Local(opponent) => Ok(opponent.choose_move(state)?),
            Participant::Remote(conn) => loop {
                let msg: ClientMessage = conn.recv().await?;
                match msg {
                    ClientMessage::DropPiece { column } if state.is_valid_move(column) => {
                        return Ok(column);
                    }
                    ClientMessage::DropPiece { column } => {
                        conn.send(&ServerMessage::InvalidMove { column }).await?;
                    }
                    _ => {
                        return Err(ProtocolError::UnexpectedMessage {
                            context: "expected DropPiece during a game",
                        });
                    }
                }
            },
        }
    }
}
