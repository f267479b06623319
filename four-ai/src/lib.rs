//! 四子棋规则型 AI
//!
//! 包含:
//! - 一步前瞻的必胜检测（模拟/撤销探测）
//! - 竖向/横向威胁封堵
//! - 随机兜底落子

mod opponent;

pub use opponent::HeuristicOpponent;
