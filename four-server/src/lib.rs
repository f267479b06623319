//! 四子棋服务端
//!
//! 包含:
//! - 匹配监听（座位分配、双人配对、人机开局）
//! - 会话协调（回合循环、落子校验、结果播报）
//! - 参与者模型（远程玩家 / 本地 AI）

pub mod matchmaker;
pub mod participant;
pub mod session;

pub use matchmaker::Matchmaker;
pub use participant::Participant;
pub use session::Session;
