//! 后台搜索
//!
//! 搜索本身是同步阻塞的，这里把整次搜索放到 tokio 的阻塞线程池里，
//! 让调用方的交互线程保持响应。

use minichess_core::{Board, Move, Side};
use tracing::warn;

use crate::config::AiConfig;
use crate::search::AiEngine;

/// 在阻塞线程池中运行一次完整搜索
pub async fn search_in_background(config: AiConfig, board: Board, side: Side) -> Option<Move> {
    let task = tokio::task::spawn_blocking(move || AiEngine::new(config).best_move(&board, side));
    match task.await {
        Ok(mv) => mv,
        Err(e) => {
            warn!("Search task failed: {}", e);
            None
        }
    }
}
