//! 连子扫描
//!
//! 从最后落子的格子出发，沿四条轴（竖向、横向、两条斜向）双向
//! 延伸统计同色连子数。连子数 ≥ 4 即获胜；竖向恰好三连、横向
//! 恰好三连 / 二连时设置对应威胁标志，供 AI 的封堵策略使用。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BOARD_COLS, BOARD_ROWS, WIN_LENGTH};

/// 威胁标志（仅供 AI 参考，不作为胜负判定依据）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReport {
    /// 竖向三连：对方下一手在同列封顶即可阻止
    pub vertical_three: bool,
    /// 横向三连
    pub horizontal_three: bool,
    /// 横向二连（距离获胜还差两子）
    pub horizontal_two: bool,
}

/// 单次扫描结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinScan {
    /// 是否构成连四
    pub win: bool,
    /// 扫描过程中发现的威胁
    pub threats: ThreatReport,
}

/// 以 (row, col) 处的棋子为中心做四轴扫描
///
/// 要求该格子非空；连子数包含中心格本身。
pub fn scan(board: &Board, row: usize, col: usize) -> WinScan {
    let mut result = WinScan {
        win: false,
        threats: ThreatReport::default(),
    };
    if board.get(row, col).is_none() {
        return result;
    }

    // 竖向
    let run = run_length(board, row, col, 1, 0);
    if run >= WIN_LENGTH {
        result.win = true;
    } else if run == 3 {
        result.threats.vertical_three = true;
    }

    // 横向
    let run = run_length(board, row, col, 0, 1);
    if run >= WIN_LENGTH {
        result.win = true;
    } else if run == 3 {
        result.threats.horizontal_three = true;
    } else if run == 2 {
        result.threats.horizontal_two = true;
    }

    // 两条斜向
    for (dr, dc) in [(1i32, 1i32), (1, -1)] {
        if run_length(board, row, col, dr, dc) >= WIN_LENGTH {
            result.win = true;
        }
    }

    result
}

/// 沿 (dr, dc) 轴双向延伸，统计经过中心格的同色连子数
fn run_length(board: &Board, row: usize, col: usize, dr: i32, dc: i32) -> usize {
    let marker = board.get(row, col);
    let mut count = 1;
    for sign in [1i32, -1] {
        let (mut r, mut c) = (row as i32 + dr * sign, col as i32 + dc * sign);
        while (0..BOARD_ROWS as i32).contains(&r)
            && (0..BOARD_COLS as i32).contains(&c)
            && board.get(r as usize, c as usize) == marker
        {
            count += 1;
            r += dr * sign;
            c += dc * sign;
        }
    }
    count
}
