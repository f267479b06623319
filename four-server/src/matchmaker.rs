//! 匹配监听
//!
//! 接受新连接，读取一条模式选择消息并分配座位：
//! - 人机模式立即开一局（对手为新建的本地 AI）；
//! - 玩家对战模式先到者入座等待，后到者与之配对开局。
//! 配对策略止步于此，对局本身全部交给 Session。

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info, warn};

use four_ai::HeuristicOpponent;
use protocol::{
    ClientMessage, Connection, GameMode, Listener, ProtocolError, Result, Seat,
    ServerMessage, SessionId,
};

use crate::participant::Participant;
use crate::session::Session;

/// 匹配器
///
/// 会话计数器只用于日志标注，对对局正确性没有影响。
pub struct Matchmaker {
    next_session_id: AtomicU64,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self {
            next_session_id: AtomicU64::new(1),
        }
    }

    /// 生成新的会话 ID
    fn next_id(&self) -> SessionId {
        self.next_session_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 接受循环
    ///
    /// 单个连接上的握手失败只丢弃该连接；accept 出错记录日志后
    /// 继续，均不影响已在运行的会话。
    pub async fn run<L>(&self, listener: &mut L) -> Result<()>
    where
        L: Listener,
        L::Conn: Send + 'static,
    {
        let mut waiting: Option<L::Conn> = None;

        loop {
            let conn = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("接受连接失败: {}", e);
                    continue;
                }
            };

            if let Err(e) = self.register(conn, &mut waiting).await {
                warn!("握手失败，丢弃连接: {}", e);
            }
        }
    }

    /// 处理一个新连接的握手与入座
    async fn register<C>(&self, mut conn: C, waiting: &mut Option<C>) -> Result<()>
    where
        C: Connection + Send + 'static,
    {
        let msg: ClientMessage = conn.recv().await?;
        let mode = match msg {
            ClientMessage::Join { mode } => mode,
            _ => {
                return Err(ProtocolError::UnexpectedMessage {
                    context: "expected Join as the first message",
                });
            }
        };

        match mode {
            GameMode::PvE => {
                conn.send(&ServerMessage::SeatAssigned { seat: Seat::One })
                    .await?;
                let id = self.next_id();
                info!(session = id, "人机对局开始匹配");
                Self::spawn_session(Session::new(
                    id,
                    Participant::Remote(conn),
                    Participant::Local(HeuristicOpponent::new()),
                ));
            }
            GameMode::PvP => {
                if let Some(first) = waiting.take() {
                    if let Err(e) = conn
                        .send(&ServerMessage::SeatAssigned { seat: Seat::Two })
                        .await
                    {
                        // 后到者握手失败，先到者继续等待
                        *waiting = Some(first);
                        return Err(e);
                    }
                    let id = self.next_id();
                    info!(session = id, "双人对局配对成功");
                    Self::spawn_session(Session::new(
                        id,
                        Participant::Remote(first),
                        Participant::Remote(conn),
                    ));
                } else {
                    conn.send(&ServerMessage::SeatAssigned { seat: Seat::One })
                        .await?;
                    info!("1 号位已入座，等待第二位玩家");
                    *waiting = Some(conn);
                }
            }
        }

        Ok(())
    }

    /// 在独立任务中运行会话；失败只终止该会话
    fn spawn_session<C>(session: Session<C>)
    where
        C: Connection + Send + 'static,
    {
        tokio::spawn(async move {
            if let Err(e) = session.run().await {
                warn!("会话异常终止: {}", e);
            }
        });
    }
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Connector, GameStatus, Side, TcpConnector, TcpListener};

    async fn join(addr: &str, mode: GameMode) -> (protocol::TcpConnection, Seat) {
        let mut conn = TcpConnector.connect(addr).await.unwrap();
        conn.send(&ClientMessage::Join { mode }).await.unwrap();
        let msg: ServerMessage = conn.recv().await.unwrap();
        match msg {
            ServerMessage::SeatAssigned { seat } => (conn, seat),
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    async fn expect_game_started(conn: &mut protocol::TcpConnection, side: Side) {
        let msg: ServerMessage = conn.recv().await.unwrap();
        assert!(matches!(msg, ServerMessage::GameStarted { your_side } if your_side == side));
    }

    #[tokio::test]
    async fn test_pvp_pairing() {
        let mut listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let matchmaker = Matchmaker::new();
            let _ = matchmaker.run(&mut listener).await;
        });

        let (mut first, seat1) = join(&addr, GameMode::PvP).await;
        assert_eq!(seat1, Seat::One);

        let (mut second, seat2) = join(&addr, GameMode::PvP).await;
        assert_eq!(seat2, Seat::Two);

        expect_game_started(&mut first, Side::Red).await;
        expect_game_started(&mut second, Side::Yellow).await;

        // 红方落一子，双方都应收到播报
        first
            .send(&ClientMessage::DropPiece { column: 3 })
            .await
            .unwrap();
        for conn in [&mut first, &mut second] {
            let msg: ServerMessage = conn.recv().await.unwrap();
            match msg {
                ServerMessage::MoveMade { side, column, row, status } => {
                    assert_eq!(side, Side::Red);
                    assert_eq!(column, 3);
                    assert_eq!(row, 5);
                    assert_eq!(status, GameStatus::Continue);
                }
                other => panic!("Unexpected message: {:?}", other),
            }
        }

        server.abort();
    }

    #[tokio::test]
    async fn test_pve_starts_immediately() {
        let mut listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let matchmaker = Matchmaker::new();
            let _ = matchmaker.run(&mut listener).await;
        });

        let (mut conn, seat) = join(&addr, GameMode::PvE).await;
        assert_eq!(seat, Seat::One);
        expect_game_started(&mut conn, Side::Red).await;

        // 玩家落子后应先后收到自己与 AI 的落子播报
        conn.send(&ClientMessage::DropPiece { column: 3 })
            .await
            .unwrap();

        let msg: ServerMessage = conn.recv().await.unwrap();
        assert!(matches!(
            msg,
            ServerMessage::MoveMade { side: Side::Red, column: 3, row: 5, status: GameStatus::Continue }
        ));

        let msg: ServerMessage = conn.recv().await.unwrap();
        match msg {
            ServerMessage::MoveMade { side, status, .. } => {
                assert_eq!(side, Side::Yellow);
                assert_eq!(status, GameStatus::Continue);
            }
            other => panic!("Unexpected message: {:?}", other),
        }

        server.abort();
    }

    #[tokio::test]
    async fn test_pve_seeker_does_not_consume_waiting_pvp_player() {
        let mut listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let matchmaker = Matchmaker::new();
            let _ = matchmaker.run(&mut listener).await;
        });

        // 1 号位等待双人对局
        let (mut first, seat1) = join(&addr, GameMode::PvP).await;
        assert_eq!(seat1, Seat::One);

        // 人机玩家到来：立即开局，不占用等待中的席位
        let (mut pve, _) = join(&addr, GameMode::PvE).await;
        expect_game_started(&mut pve, Side::Red).await;

        // 等待者仍可与下一位双人玩家配对
        let (mut second, seat2) = join(&addr, GameMode::PvP).await;
        assert_eq!(seat2, Seat::Two);
        expect_game_started(&mut first, Side::Red).await;
        expect_game_started(&mut second, Side::Yellow).await;

        server.abort();
    }
}
