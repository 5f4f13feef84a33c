//! End-to-end sessions against a scripted engine.

use chess::PieceColor;
use chesstty::{run_session, GameOutcome, SessionError, SessionSettings};
use engine::{EngineError, MockCall, MockEngine};

fn settings() -> SessionSettings {
    SessionSettings::default()
}

fn stops(engine: &MockEngine) -> usize {
    engine.count(|call| matches!(call, MockCall::Stop))
}

async fn play(
    engine: &mut MockEngine,
    input: &str,
    settings: SessionSettings,
) -> (Result<chesstty::SessionSummary, SessionError>, String) {
    let mut output = Vec::new();
    let result = run_session(engine, input.as_bytes(), &mut output, settings).await;
    (result, String::from_utf8_lossy(&output).into_owned())
}

#[tokio::test]
async fn two_moves_then_quit() {
    let mut engine = MockEngine::new().with_best_moves([Some("e7e5"), Some("b8c6")]);
    let (result, output) = play(&mut engine, "e4\nNf3\nquit\n", settings()).await;
    let summary = result.unwrap();

    assert_eq!(summary.outcome, GameOutcome::Quit);
    assert_eq!(
        summary.game.raw_history(),
        &["e2e4", "e7e5", "g1f3", "b8c6"]
    );
    assert_eq!(
        summary.game.display_history(),
        &["1. e4", "1... e5", "2. Nf3", "2... Nc6"]
    );
    assert_eq!(
        engine.positions(),
        vec!["".to_string(), "e2e4".to_string(), "e2e4 e7e5 g1f3".to_string()]
    );
    // Only the shutdown follows the last best-move request
    let calls = engine.calls();
    assert_eq!(calls.last(), Some(&MockCall::Stop));
    assert!(matches!(
        calls[calls.len() - 2],
        MockCall::RequestBestMove(_)
    ));
    assert_eq!(stops(&engine), 1);

    assert!(output.contains("Game started. You are playing White."));
    assert!(output.contains("1. e4   1... e5\n2. Nf3   2... Nc6"));
    assert!(output.contains("Game exited."));
}

#[tokio::test]
async fn handshake_precedes_first_prompt() {
    let mut engine = MockEngine::new();
    let (result, _) = play(&mut engine, "quit\n", settings()).await;
    assert_eq!(result.unwrap().outcome, GameOutcome::Quit);
    assert_eq!(
        engine.calls(),
        &[
            MockCall::Start,
            MockCall::Send("uci".to_string()),
            MockCall::AwaitResponse,
            MockCall::ApplyOptions,
            MockCall::Send("isready".to_string()),
            MockCall::AwaitResponse,
            MockCall::SetPosition(String::new()),
            MockCall::Stop,
        ]
    );
}

#[tokio::test]
async fn engine_resignation_after_first_move() {
    let mut engine = MockEngine::new().with_best_moves([None::<&str>]);
    let (result, output) = play(&mut engine, "e4\nd4\n", settings()).await;
    let summary = result.unwrap();

    assert_eq!(summary.outcome, GameOutcome::EngineResigned);
    assert_eq!(summary.game.raw_history(), &["e2e4"]);
    assert_eq!(summary.game.display_history(), &["1. e4"]);
    assert_eq!(stops(&engine), 1);
    assert!(output.contains("Game over."));
}

#[tokio::test]
async fn unrecognized_input_reprompts_without_mutation() {
    let mut engine = MockEngine::new().with_best_moves([Some("e7e5")]);
    let (result, output) = play(&mut engine, "hello\nNf5\ne7e5\ne4\nquit\n", settings()).await;
    let summary = result.unwrap();

    assert_eq!(summary.game.raw_history(), &["e2e4", "e7e5"]);
    assert_eq!(output.matches("Invalid move format.").count(), 2);
    assert_eq!(output.matches("Illegal move:").count(), 1);
    assert_eq!(
        engine.count(|call| matches!(call, MockCall::RequestBestMove(_))),
        1
    );
}

#[tokio::test]
async fn quit_is_case_insensitive() {
    let mut engine = MockEngine::new();
    let (result, _) = play(&mut engine, "  QuIt \n", settings()).await;
    assert_eq!(result.unwrap().outcome, GameOutcome::Quit);
}

#[tokio::test]
async fn end_of_input_ends_session() {
    let mut engine = MockEngine::new();
    let (result, _) = play(&mut engine, "", settings()).await;
    assert_eq!(result.unwrap().outcome, GameOutcome::InputClosed);
    assert_eq!(stops(&engine), 1);
}

#[tokio::test]
async fn board_command_prints_position() {
    let mut engine = MockEngine::new();
    let (result, output) = play(&mut engine, "board\nquit\n", settings()).await;
    assert!(result.unwrap().game.raw_history().is_empty());
    assert!(output.contains("8  r n b q k b n r"));
    assert!(output.contains("1  R N B Q K B N R"));
}

#[tokio::test]
async fn startup_failure_never_starts_session() {
    let mut engine = MockEngine::new().failing_start();
    let (result, output) = play(&mut engine, "e4\n", settings()).await;

    assert!(matches!(result, Err(SessionError::Startup(EngineError::NotFound))));
    assert_eq!(engine.calls(), &[MockCall::Start]);
    assert!(output.is_empty());
}

#[tokio::test]
async fn engine_io_failure_still_stops_engine() {
    let mut engine = MockEngine::new().failing_best_move();
    let (result, _) = play(&mut engine, "e4\n", settings()).await;

    assert!(matches!(result, Err(SessionError::Engine(EngineError::Io(_)))));
    assert_eq!(stops(&engine), 1);
}

#[tokio::test]
async fn malformed_engine_move_is_fatal() {
    let mut engine = MockEngine::new().with_best_moves([Some("zz99")]);
    let (result, _) = play(&mut engine, "e4\n", settings()).await;

    assert!(matches!(result, Err(SessionError::EngineMove(_))));
    assert_eq!(stops(&engine), 1);
}

#[tokio::test]
async fn think_time_is_forwarded() {
    let mut engine = MockEngine::new();
    let settings = SessionSettings {
        think_time_ms: 250,
        ..settings()
    };
    let (result, _) = play(&mut engine, "e4\n", settings).await;
    assert_eq!(result.unwrap().outcome, GameOutcome::EngineResigned);
    assert_eq!(
        engine.count(|call| matches!(call, MockCall::RequestBestMove(250))),
        1
    );
}

#[tokio::test]
async fn human_can_play_black() {
    let mut engine = MockEngine::new().with_best_moves([Some("e2e4"), Some("g1f3")]);
    let settings = SessionSettings {
        human_side: PieceColor::Black,
        ..settings()
    };
    let (result, output) = play(&mut engine, "e5\nquit\n", settings).await;
    let summary = result.unwrap();

    assert_eq!(summary.game.raw_history(), &["e2e4", "e7e5", "g1f3"]);
    assert_eq!(
        summary.game.display_history(),
        &["1. e4", "1... e5", "2. Nf3"]
    );
    assert_eq!(summary.game.turn(), 2);
    assert_eq!(engine.positions(), vec!["", "", "e2e4 e7e5"]);
    assert!(output.contains("You are playing Black."));
}

#[tokio::test]
async fn moves_onto_own_piece_or_nowhere_reprompt() {
    let mut engine = MockEngine::new();
    let (result, output) = play(&mut engine, "e1\ne2\ne1e2\nquit\n", settings()).await;
    let summary = result.unwrap();

    assert_eq!(summary.outcome, GameOutcome::Quit);
    assert!(summary.game.raw_history().is_empty());
    assert_eq!(summary.game.board(), &chess::Board::new());
    assert_eq!(output.matches("Illegal move:").count(), 3);
    assert_eq!(
        engine.count(|call| matches!(call, MockCall::RequestBestMove(_))),
        0
    );
    assert_eq!(engine.positions(), vec![""]);
}
