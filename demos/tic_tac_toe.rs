extern crate minimax_ttt;

use minimax_ttt::board::{Board, Outcome, Symbol};
use minimax_ttt::config::GameConfig;
use minimax_ttt::minimax::Minimax;
use minimax_ttt::policy::PolicyKind;
use minimax_ttt::random::SeededRandomGenerator;
use minimax_ttt::session::GameSession;
use tracing_subscriber::EnvFilter;

fn main() -> minimax_ttt::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Evaluate every opening move
    let board = Board::new();
    for mv in board.legal_moves() {
        let mut after = board;
        after.place(mv, Symbol::X)?;
        let reply = Minimax::new(&after).search(Symbol::O)?;
        println!("Opening {mv}: value {} with O replying {:?}", reply.score, reply.mv);
    }

    // Hard against hard: always a draw
    let mut session = GameSession::builder()
        .with_config(GameConfig::new(PolicyKind::Optimal, PolicyKind::Optimal))
        .build();
    let outcome = session.start()?;
    println!("\nhard vs hard: {outcome}\n{}", session.board());
    assert_eq!(outcome, Outcome::Draw);

    // Hard against easy, seeded so the game can be replayed
    let random = SeededRandomGenerator::from_random();
    let seed = random.seed();
    let yaml = "x: easyAI\no: hardAI\n";
    let mut session = GameSession::builder()
        .with_config(GameConfig::from_yaml_str(yaml)?)
        .with_random_generator(random)
        .build();
    let outcome = session.start()?;
    println!("\neasy vs hard (seed {seed}): {outcome}\n{}", session.board());
    for (ply, mv) in session.history().iter().enumerate() {
        println!("  ply {}: {mv}", ply + 1);
    }
    assert_ne!(outcome, Outcome::Win(Symbol::X));

    Ok(())
}
