//! Drives `StockfishEngine` against a tiny shell-script UCI engine.
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::{EngineBridge, EngineConfig, EngineError, StockfishEngine};

const RESPONSIVE: &str = r#"
while read line; do
  case "$line" in
    uci) echo "id name FakeFish"; echo "uciok" ;;
    isready) echo "readyok" ;;
    "position startpos moves e2e4") last="e7e5" ;;
    position*) last="b8c6" ;;
    go*) echo "info depth 1 score cp 12 pv $last"; echo "bestmove $last" ;;
    quit) exit 0 ;;
  esac
done
"#;

const RESIGNING: &str = r#"
while read line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "bestmove (none)" ;;
    quit) exit 0 ;;
  esac
done
"#;

const SILENT_ON_GO: &str = r#"
while read line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
  esac
done
"#;

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("engine.sh");
    std::fs::write(&path, body).expect("failed to write fake engine");
    path
}

fn engine_for(script: PathBuf, timeout: Duration) -> StockfishEngine {
    StockfishEngine::new(EngineConfig {
        path: Some(PathBuf::from("/bin/sh")),
        args: vec![script.to_string_lossy().into_owned()],
        response_timeout: timeout,
        ..Default::default()
    })
}

#[tokio::test]
async fn handshake_position_and_best_move() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut engine = engine_for(write_script(dir.path(), RESPONSIVE), Duration::from_secs(5));

    engine.start().await.unwrap();
    assert!(engine.is_running());

    engine.send("uci").await.unwrap();
    assert_eq!(engine.await_response().await.unwrap(), "uciok");
    engine.apply_options().await.unwrap();
    engine.send("isready").await.unwrap();
    assert_eq!(engine.await_response().await.unwrap(), "readyok");

    engine.set_position("e2e4").await.unwrap();
    let best = engine.request_best_move(10).await.unwrap();
    assert_eq!(best.as_deref(), Some("e7e5"));

    engine.set_position("e2e4 e7e5 g1f3").await.unwrap();
    let best = engine.request_best_move(10).await.unwrap();
    assert_eq!(best.as_deref(), Some("b8c6"));

    engine.stop().await;
    assert!(!engine.is_running());
    engine.stop().await;
}

#[tokio::test]
async fn no_move_sentinel_maps_to_none() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut engine = engine_for(write_script(dir.path(), RESIGNING), Duration::from_secs(5));

    engine.start().await.unwrap();
    engine.send("uci").await.unwrap();
    engine.await_response().await.unwrap();
    engine.set_position("").await.unwrap();
    assert_eq!(engine.request_best_move(10).await.unwrap(), None);
    engine.stop().await;
}

#[tokio::test]
async fn stalled_engine_times_out() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut engine = engine_for(
        write_script(dir.path(), SILENT_ON_GO),
        Duration::from_millis(200),
    );

    engine.start().await.unwrap();
    engine.send("uci").await.unwrap();
    engine.await_response().await.unwrap();
    let err = engine.request_best_move(10).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Timeout {
            waiting_for: "best move",
            ..
        }
    ));
    engine.stop().await;
}
