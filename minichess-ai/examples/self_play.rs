//! AI 自我对弈
//!
//! 运行方式:
//! ```bash
//! RUST_LOG=minichess_ai=debug cargo run -p minichess-ai --example self_play
//! ```

use minichess_ai::{AiConfig, AiEngine, Difficulty};
use minichess_core::{BoardState, Fen, GameStatus, MoveGenerator, Notation};
use tracing_subscriber::EnvFilter;

/// 对局最大步数
const MAX_PLIES: usize = 200;

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("minichess_ai=info".parse()?))
        .init();

    let config = AiConfig::from_difficulty(Difficulty::Medium).with_time_limit(2000);
    let mut engine = AiEngine::new(config);
    let mut state = BoardState::initial();

    println!("=== 6x5 自我对弈 ===\n");
    println!("{}", Fen::to_string(&state));

    for ply in 1..=MAX_PLIES {
        let status = MoveGenerator::status(&state.board, state.side_to_move);
        if status.is_terminal() {
            println!("\n结果: {:?}", status);
            return Ok(());
        }
        if status == GameStatus::Check {
            println!("   {} 被将军", state.side_to_move);
        }

        let Some(mv) = engine.best_move(&state.board, state.side_to_move) else {
            break;
        };
        let mover = state.side_to_move;
        let captured = state.play(mv)?;

        print!("{:>3}. {:<5} {}", ply, mover.to_string(), Notation::to_coordinate(&mv));
        if let Some(piece) = captured {
            print!("  x{}", piece.symbol());
        }
        println!("  ({} nodes)", engine.nodes_searched());
    }

    let status = MoveGenerator::status(&state.board, state.side_to_move);
    println!("\n结束: {:?}", status);
    println!("{}", Fen::to_string(&state));
    Ok(())
}
