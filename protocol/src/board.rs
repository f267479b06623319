//! 棋盘状态与落子引擎

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS, MAX_MOVES};
use crate::error::GameError;
use crate::win::{self, ThreatReport};

/// 棋子颜色（One 号位执红，先手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（先手）
    Red,
    /// 黄方（后手）
    Yellow,
}

impl Side {
    /// 获取对方颜色
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Yellow,
            Side::Yellow => Side::Red,
        }
    }
}

/// 棋盘格子矩阵
///
/// 6 行 × 7 列，行 0 为顶部，行 5 为底部（重力落点）。
/// 索引为 row * 7 + col，使用 Vec 以支持 serde。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<Side>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![None; BOARD_ROWS * BOARD_COLS],
        }
    }

    /// 获取指定格子的棋子
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            self.cells[row * BOARD_COLS + col]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Side>) {
        if row < BOARD_ROWS && col < BOARD_COLS {
            self.cells[row * BOARD_COLS + col] = cell;
        }
    }

    /// 返回指定列中棋子将落入的行，该列已满时返回 None
    ///
    /// 从底部（行 5）向上扫描，找到第一个空格。
    pub fn lowest_open_row(&self, col: usize) -> Option<usize> {
        if col >= BOARD_COLS {
            return None;
        }
        (0..BOARD_ROWS).rev().find(|&row| self.get(row, col).is_none())
    }

    /// 返回指定列中最后落入棋子所在的行，该列为空时返回 None
    pub fn top_filled_row(&self, col: usize) -> Option<usize> {
        if col >= BOARD_COLS {
            return None;
        }
        (0..BOARD_ROWS).find(|&row| self.get(row, col).is_some())
    }

    /// 检查指定列是否已满
    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_open_row(col).is_none()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// 完整的对局状态（棋盘 + 走子方、步数、威胁标志等）
///
/// 每局对局恰好持有一个实例，只被该局的会话循环（及 AI 的
/// 模拟/撤销探测）串行访问，不需要内部锁。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub current_turn: Side,
    /// 已落子数（0..=42）
    pub move_count: u32,
    /// 最后一手的 (列, 行)
    pub last_move: Option<(u8, u8)>,
    /// 最近一次 check_for_win 计算出的威胁标志（仅供 AI 参考）
    pub threats: ThreatReport,
}

impl GameState {
    /// 创建初始状态（红方先行）
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            current_turn: Side::Red,
            move_count: 0,
            last_move: None,
            threats: ThreatReport::default(),
        }
    }

    /// 检查落子是否合法：列号在界内且该列未满
    ///
    /// 纯查询，无副作用。
    pub fn is_valid_move(&self, col: u8) -> bool {
        (col as usize) < BOARD_COLS && !self.board.is_column_full(col as usize)
    }

    /// 在指定列落下当前走子方的棋子，返回落入的行
    ///
    /// 按重力解析落点，切换走子方，步数 +1，并记录最后一手。
    pub fn place_marker(&mut self, col: u8) -> Result<u8, GameError> {
        if (col as usize) >= BOARD_COLS {
            return Err(GameError::ColumnOutOfRange { column: col });
        }
        let row = self
            .board
            .lowest_open_row(col as usize)
            .ok_or(GameError::ColumnFull { column: col })?;

        self.board.set(row, col as usize, Some(self.current_turn));
        self.current_turn = self.current_turn.opponent();
        self.move_count += 1;
        self.last_move = Some((col, row as u8));

        Ok(row as u8)
    }

    /// 撤销指定列中最近的一次落子（仅供 AI 探测使用）
    ///
    /// 清空该列最顶部的棋子，步数 -1，走子方切换回去。
    /// 只允许紧跟在同一列的 place_marker 之后调用；不恢复
    /// last_move，由执行模拟/撤销配对的调用方自行快照并还原。
    pub fn remove_marker(&mut self, col: u8) -> Result<(), GameError> {
        if (col as usize) >= BOARD_COLS {
            return Err(GameError::ColumnOutOfRange { column: col });
        }
        let row = self
            .board
            .top_filled_row(col as usize)
            .ok_or(GameError::ColumnEmpty { column: col })?;

        self.board.set(row, col as usize, None);
        self.current_turn = self.current_turn.opponent();
        self.move_count -= 1;

        Ok(())
    }

    /// 检查最后落入指定列的棋子是否构成连四
    ///
    /// 先重置三个威胁标志，再从该列最顶部棋子出发沿四条轴
    /// 双向扫描，任一方向连子数 ≥ 4 即获胜。扫描同时刷新
    /// 威胁标志（竖向三连 / 横向三连 / 横向二连）供 AI 使用。
    pub fn check_for_win(&mut self, col: u8) -> bool {
        self.threats = ThreatReport::default();

        let Some(row) = self.board.top_filled_row(col as usize) else {
            return false;
        };

        let scan = win::scan(&self.board, row, col as usize);
        self.threats = scan.threats;
        scan.win
    }

    /// 试探性评估：在指定列落子是否立即获胜
    ///
    /// 内部执行 place_marker / check_for_win / remove_marker 的
    /// 配对模拟，并还原 last_move 与威胁标志，净效果为纯查询。
    pub fn would_win(&mut self, col: u8) -> Result<bool, GameError> {
        let saved_last_move = self.last_move;
        let saved_threats = self.threats;

        self.place_marker(col)?;
        let win = self.check_for_win(col);
        self.remove_marker(col)?;

        self.last_move = saved_last_move;
        self.threats = saved_threats;
        Ok(win)
    }

    /// 检查是否已满盘（平局判定在未获胜的前提下使用）
    pub fn is_draw(&self) -> bool {
        self.move_count == MAX_MOVES
    }

    /// 最后落子方（尚未落子时返回 None）
    pub fn last_marker(&self) -> Option<Side> {
        if self.move_count == 0 {
            None
        } else {
            Some(self.current_turn.opponent())
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 无人获胜填满全盘的 42 步落子序列
    ///
    /// 每两列为一组交替填充：先各堆三子，再互相封顶，
    /// 最后一列交替填满。最长连子数为 3。
    fn drawn_sequence() -> Vec<u8> {
        let mut seq = Vec::with_capacity(42);
        for base in [0u8, 2, 4] {
            seq.extend_from_slice(&[base, base + 1, base, base + 1, base, base + 1]);
            seq.extend_from_slice(&[base + 1, base, base + 1, base, base + 1, base]);
        }
        seq.extend_from_slice(&[6; 6]);
        seq
    }

    #[test]
    fn test_valid_move_bounds() {
        let state = GameState::new();
        for col in 0..7 {
            assert!(state.is_valid_move(col));
        }
        assert!(!state.is_valid_move(7));
        assert!(!state.is_valid_move(200));
    }

    #[test]
    fn test_full_column_invalid() {
        let mut state = GameState::new();
        for _ in 0..6 {
            state.place_marker(3).unwrap();
        }
        assert!(!state.is_valid_move(3));
        assert!(state.is_valid_move(2));
        assert_eq!(
            state.place_marker(3),
            Err(GameError::ColumnFull { column: 3 })
        );
    }

    #[test]
    fn test_gravity_landing_rows() {
        let mut state = GameState::new();
        // 同一列依次落子，从底部（行 5）向上堆叠
        assert_eq!(state.place_marker(2).unwrap(), 5);
        assert_eq!(state.place_marker(2).unwrap(), 4);
        assert_eq!(state.place_marker(2).unwrap(), 3);
        // 其他列不受影响
        assert_eq!(state.place_marker(0).unwrap(), 5);
        assert_eq!(state.move_count, 4);
    }

    #[test]
    fn test_turn_alternation() {
        let mut state = GameState::new();
        assert_eq!(state.current_turn, Side::Red);
        state.place_marker(0).unwrap();
        assert_eq!(state.current_turn, Side::Yellow);
        assert_eq!(state.last_marker(), Some(Side::Red));
        state.place_marker(1).unwrap();
        assert_eq!(state.current_turn, Side::Red);
        assert_eq!(state.last_marker(), Some(Side::Yellow));
    }

    #[test]
    fn test_remove_marker_restores() {
        let mut state = GameState::new();
        state.place_marker(4).unwrap();
        let before = state.clone();

        state.place_marker(4).unwrap();
        state.remove_marker(4).unwrap();
        state.last_move = before.last_move;

        assert_eq!(state, before);
        assert_eq!(
            GameState::new().remove_marker(0),
            Err(GameError::ColumnEmpty { column: 0 })
        );
    }

    #[test]
    fn test_horizontal_win_scenario() {
        // 场景 A：红方在 0,1,2,3 列各落一子（均落在底行）
        let mut state = GameState::new();
        for col in 0..4u8 {
            state.board.set(5, col as usize, Some(Side::Red));
        }
        assert!(state.check_for_win(3));
        assert!(state.check_for_win(0));
    }

    #[test]
    fn test_vertical_win_scenario() {
        // 场景 B：红方在 0 列连落四子
        let mut state = GameState::new();
        for _ in 0..4 {
            state.board.set(state.board.lowest_open_row(0).unwrap(), 0, Some(Side::Red));
        }
        assert!(state.check_for_win(0));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut state = GameState::new();
        for col in 0..3usize {
            state.board.set(5, col, Some(Side::Yellow));
        }
        assert!(!state.check_for_win(2));
        assert!(state.threats.horizontal_three);
    }

    #[test]
    fn test_diagonal_wins() {
        // 正斜向：(5,0) (4,1) (3,2) (2,3)
        let mut state = GameState::new();
        for i in 0..4usize {
            state.board.set(5 - i, i, Some(Side::Red));
        }
        assert!(state.check_for_win(3));

        // 反斜向：(2,0) (3,1) (4,2) (5,3)
        let mut state = GameState::new();
        for i in 0..4usize {
            state.board.set(2 + i, i, Some(Side::Yellow));
        }
        assert!(state.check_for_win(0));
    }

    #[test]
    fn test_win_through_middle_of_run() {
        // 最后一手补在四连中间：X X _ X + 中间落子
        let mut state = GameState::new();
        for col in [0usize, 1, 3] {
            state.board.set(5, col, Some(Side::Red));
        }
        state.board.set(5, 2, Some(Side::Red));
        assert!(state.check_for_win(2));
    }

    #[test]
    fn test_would_win_is_pure() {
        let mut state = GameState::new();
        // 红方三连，第四子即胜
        for _ in 0..3 {
            state.place_marker(0).unwrap();
            state.place_marker(6).unwrap();
        }
        let before = state.clone();

        assert!(state.would_win(0).unwrap());
        assert!(!state.would_win(3).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_drawn_game_fills_board() {
        // 场景 C：42 步填满全盘且途中无人获胜
        let mut state = GameState::new();
        for col in drawn_sequence() {
            assert!(state.is_valid_move(col));
            state.place_marker(col).unwrap();
            assert!(!state.check_for_win(col));
        }
        assert_eq!(state.move_count, 42);
        assert!(state.is_draw());
        for col in 0..7 {
            assert!(!state.is_valid_move(col));
        }
    }
}
