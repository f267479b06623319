//! 规则型对手
//!
//! 无状态决策策略（随机数种子除外），按严格优先级在当前
//! 棋盘上选择一列：
//! 1. 能直接连四则落子取胜；
//! 2. 对方竖向三连时在同列封顶；
//! 3. 对方横向三连/二连时封堵连子段的一端；
//! 4. 否则在所有合法列中等概率随机。
//!
//! 只做一步前瞻，不做深层搜索；除第 1 步的配对模拟/撤销外
//! 不改动棋盘。

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use protocol::{GameError, GameState, BOARD_COLS};

/// 规则型对手
///
/// 持有自己的随机数发生器；落子时由会话循环借给它对局状态，
/// 探测期间它独占该状态。
pub struct HeuristicOpponent {
    rng: ChaCha8Rng,
}

impl HeuristicOpponent {
    /// 创建新的对手实例
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 用固定种子创建（测试用，落子序列可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// 选择下一手的列号
    ///
    /// 己方颜色即 state.current_turn。返回的列保证满足
    /// is_valid_move；仅在满盘（不可达，满盘前必为平局终局）
    /// 时返回 NoValidMoves。
    pub fn choose_move(&mut self, state: &mut GameState) -> Result<u8, GameError> {
        // 1. 必胜检测：逐列模拟落子、判胜、撤销
        for col in 0..BOARD_COLS as u8 {
            if state.is_valid_move(col) && state.would_win(col)? {
                debug!(col, "发现必胜落子");
                return Ok(col);
            }
        }

        if let Some((last_col, _)) = state.last_move {
            // 重新扫描对方最后一手，刷新威胁标志
            state.check_for_win(last_col);

            // 2. 竖向封堵：对方三连的列上封顶
            if state.threats.vertical_three && state.is_valid_move(last_col) {
                debug!(col = last_col, "封堵竖向三连");
                return Ok(last_col);
            }

            // 3. 横向封堵
            if state.threats.horizontal_three || state.threats.horizontal_two {
                if let Some(col) = Self::horizontal_block(state, last_col) {
                    debug!(col, "封堵横向连子");
                    return Ok(col);
                }
            }
        }

        // 4. 随机兜底
        self.random_move(state)
    }

    /// 沿对方最后一手所在的行寻找可落子的封堵点
    ///
    /// 先向右沿对方连子段推进，段末之后的一格若为空且落子
    /// 恰好落在该行则封堵；否则向左对称尝试。两端判定条件
    /// 相同。
    fn horizontal_block(state: &GameState, last_col: u8) -> Option<u8> {
        let row = state.board.top_filled_row(last_col as usize)?;
        let marker = state.board.get(row, last_col as usize)?;

        for dir in [1i32, -1] {
            let mut col = last_col as i32 + dir;
            while (0..BOARD_COLS as i32).contains(&col)
                && state.board.get(row, col as usize) == Some(marker)
            {
                col += dir;
            }

            // col 此时指向连子段末端之后的一格
            if (0..BOARD_COLS as i32).contains(&col)
                && state.board.get(row, col as usize).is_none()
                && state.board.lowest_open_row(col as usize) == Some(row)
            {
                return Some(col as u8);
            }
        }

        None
    }

    /// 在所有合法列中等概率随机选择
    fn random_move(&mut self, state: &GameState) -> Result<u8, GameError> {
        let valid: Vec<u8> = (0..BOARD_COLS as u8)
            .filter(|&col| state.is_valid_move(col))
            .collect();
        valid
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoValidMoves)
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}
