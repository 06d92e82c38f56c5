//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝 + 迭代加深。
//!
//! 分值采用固定视角（正值对黑方有利），黑方是极大方、白方是极小方。
//! 超时后递归调用直接返回静态评估，只有完整跑完的深度才会更新最佳走法。

use std::time::{Duration, Instant};

use minichess_core::{Board, Move, MoveGenerator, Side, MATE_SCORE, MAX_SEARCH_PLY};
use tracing::{debug, info};

use crate::config::AiConfig;
use crate::evaluate::Evaluator;

/// Alpha-Beta 初始窗口
const INFINITY: i32 = 1_000_000;

/// 单次搜索的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 最佳走法，走子方无合法走法时为 None
    pub best_move: Option<Move>,
    /// 最后一个完整深度的分值，一个深度都没跑完时为 None
    pub score: Option<i32>,
    /// 完整跑完的最大深度
    pub completed_depth: u8,
    /// 搜索的节点数
    pub nodes: u64,
    /// 耗时
    pub elapsed: Duration,
}

/// 单次搜索的上下文（截止时间和节点计数），在递归中显式传递
struct SearchContext {
    started: Instant,
    deadline: Option<Instant>,
    nodes: u64,
}

impl SearchContext {
    fn new(time_limit: Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            // 时间预算过大时视为不限时
            deadline: started.checked_add(time_limit),
            nodes: 0,
        }
    }

    fn time_up(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法
    pub fn best_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.search(board, side).best_move
    }

    /// 迭代加深搜索，返回最佳走法和统计信息
    pub fn search(&mut self, board: &Board, side: Side) -> SearchResult {
        let mut ctx = SearchContext::new(self.config.time_limit());

        // 生成所有合法走法
        let moves = MoveGenerator::all_legal_moves(board, side);
        if moves.is_empty() {
            debug!("{} has no legal moves", side);
            return self.finish(&ctx, None, None, 0);
        }

        // 如果只有一个走法，直接返回
        if moves.len() == 1 {
            return self.finish(&ctx, Some(moves[0]), None, 0);
        }

        // 一个深度都没跑完时退回到第一个走法
        let mut best_move = moves[0];
        let mut best_score = None;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            if ctx.time_up() {
                break;
            }

            match self.search_root(&mut ctx, board, side, &moves, depth) {
                Some((mv, score)) => {
                    best_move = mv;
                    best_score = Some(score);
                    completed_depth = depth;
                    debug!(
                        "depth {} complete: best {} score {} nodes {}",
                        depth, mv, score, ctx.nodes
                    );
                }
                None => {
                    debug!("early stop at depth {}, nodes: {}", depth, ctx.nodes);
                    break;
                }
            }
        }

        self.finish(&ctx, Some(best_move), best_score, completed_depth)
    }

    /// 根节点搜索一个完整深度
    ///
    /// 每个根走法用全窗口单独搜索，走子方取对自己最有利的分值，分值相同保留先遇到的走法。
    /// 超时则返回 None，本深度的临时结果作废。
    fn search_root(
        &self,
        ctx: &mut SearchContext,
        board: &Board,
        side: Side,
        moves: &[Move],
        depth: u8,
    ) -> Option<(Move, i32)> {
        let child_maximizing = side.opponent() == Side::Dark;
        let mut best: Option<(Move, i32)> = None;

        for &mv in moves {
            if ctx.time_up() {
                return None;
            }

            // 模拟走法
            let (child, _) = board.apply_move(mv);
            let score = self.minimax(
                ctx,
                &child,
                depth - 1,
                -INFINITY,
                INFINITY,
                child_maximizing,
                1,
            );

            let better = match best {
                None => true,
                Some((_, best_score)) => match side {
                    Side::Dark => score > best_score,
                    Side::Light => score < best_score,
                },
            };
            if better {
                best = Some((mv, score));
            }
        }

        if ctx.time_up() {
            return None;
        }
        best
    }

    /// Minimax + Alpha-Beta 搜索
    ///
    /// `maximizing` 为 true 时黑方走子。`ply` 为距根节点的层数，根走法之后的节点为 1，
    /// 所以一步杀的分值是 ±(MATE_SCORE - 1)，层数上限也按这个起点计算。
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        ctx: &mut SearchContext,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u32,
    ) -> i32 {
        // 检查时间：超时时返回当前静态评估值
        if ctx.time_up() {
            return Evaluator::evaluate(board);
        }

        ctx.nodes += 1;

        if depth == 0 || board.is_game_over() || ply > MAX_SEARCH_PLY {
            return Evaluator::evaluate(board);
        }

        let side = if maximizing { Side::Dark } else { Side::Light };
        let moves = MoveGenerator::all_legal_moves(board, side);

        // 无子可动
        if moves.is_empty() {
            if MoveGenerator::is_in_check(board, side) {
                // 被将死，越快将死分值越极端
                return if maximizing {
                    -MATE_SCORE + ply as i32
                } else {
                    MATE_SCORE - ply as i32
                };
            }
            // 困毙（和棋）
            return 0;
        }

        let mut best: Option<i32> = None;

        for mv in moves {
            if ctx.time_up() {
                break;
            }

            let (child, _) = board.apply_move(mv);
            let score = self.minimax(ctx, &child, depth - 1, alpha, beta, !maximizing, ply + 1);

            if maximizing {
                best = Some(best.map_or(score, |b| b.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |b| b.min(score)));
                beta = beta.min(score);
            }

            if beta <= alpha {
                break; // 剪枝
            }
        }

        // 第一个子节点之前就超时
        best.unwrap_or_else(|| Evaluator::evaluate(board))
    }

    fn finish(
        &mut self,
        ctx: &SearchContext,
        best_move: Option<Move>,
        score: Option<i32>,
        completed_depth: u8,
    ) -> SearchResult {
        let elapsed = ctx.started.elapsed();
        self.nodes_searched = ctx.nodes;
        info!(
            "Search completed: {} nodes, {}ms, final depth: {}",
            ctx.nodes,
            elapsed.as_millis(),
            completed_depth
        );

        SearchResult {
            best_move,
            score,
            completed_depth,
            nodes: ctx.nodes,
            elapsed,
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 在指定深度和时间预算内为走子方选择走法
///
/// 无合法走法时返回 None，调用方用 `MoveGenerator::is_in_check` 区分将死和困毙。
pub fn best_move(board: &Board, side: Side, max_depth: u8, time_limit_ms: u64) -> Option<Move> {
    let config = AiConfig::from_depth(max_depth).with_time_limit(time_limit_ms);
    AiEngine::new(config).best_move(board, side)
}
