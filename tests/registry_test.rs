//! Matchmaking registry driven by a manual clock.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;
use strictly_gomoku::{
    Cell, Clock, EndReason, GameConfig, GameError, ManualClock, MoveOutcome, RevokeState, Role,
    SessionManager, Status, Stone,
};

fn setup() -> (SessionManager, ManualClock) {
    let start = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000);
    let clock = ManualClock::new(start);
    let manager = SessionManager::with_clock(Arc::new(clock.clone()), GameConfig::default());
    (manager, clock)
}

fn seated_and_started(manager: &SessionManager) {
    manager.join("t1", "alice", Stone::Black).unwrap();
    manager.join("t1", "bob", Stone::White).unwrap();
    manager.start_game("t1", "alice").unwrap();
}

#[test]
fn test_seat_rules() {
    let (manager, _clock) = setup();
    manager.join("t1", "alice", Stone::Black).unwrap();

    assert_eq!(
        manager.join("t1", "carol", Stone::Black),
        Err(GameError::SeatTaken {
            seat: Stone::Black,
            holder: "alice".to_string()
        })
    );
    assert_eq!(
        manager.join("t1", "alice", Stone::White),
        Err(GameError::SelfMatchNotAllowed("alice".to_string()))
    );
    assert_eq!(
        manager.join("t2", "alice", Stone::White),
        Err(GameError::AlreadyInSession {
            player: "alice".to_string(),
            session: "t1".to_string()
        })
    );
    // The failed join did not leave a table behind
    assert_eq!(manager.list_sessions().unwrap(), vec!["t1"]);

    assert_eq!(manager.role_of("t1", "alice"), Ok(Role::Black));
    assert_eq!(manager.role_of("t1", "carol"), Ok(Role::Observer));
    assert_eq!(
        manager.role_of("nope", "alice"),
        Err(GameError::SessionNotFound("nope".to_string()))
    );
}

#[test]
fn test_start_rules() {
    let (manager, _clock) = setup();
    manager.join("t1", "alice", Stone::Black).unwrap();
    assert_eq!(
        manager.start_game("t1", "alice"),
        Err(GameError::WaitingForOpponent)
    );
    manager.join("t1", "bob", Stone::White).unwrap();
    assert_eq!(
        manager.start_game("t1", "bob"),
        Err(GameError::OnlyBlackMayStart("bob".to_string()))
    );
    manager.start_game("t1", "alice").unwrap();
    assert_eq!(
        manager.start_game("t1", "alice"),
        Err(GameError::AlreadyStarted)
    );
    assert_eq!(manager.current_turn_player("t1"), Ok("alice".to_string()));
}

#[test]
fn test_moves_routed_by_participant() {
    let (manager, clock) = setup();
    seated_and_started(&manager);
    manager.join("t2", "carol", Stone::Black).unwrap();
    manager.join("t2", "dave", Stone::White).unwrap();
    manager.start_game("t2", "carol").unwrap();

    clock.advance(TimeDelta::seconds(5));
    manager.make_move("alice", 7, 7).unwrap();
    manager.make_move("carol", 0, 0).unwrap();

    assert_eq!(manager.cell_at("t1", 7, 7), Ok(Cell::Occupied(Stone::Black)));
    assert_eq!(manager.cell_at("t1", 0, 0), Ok(Cell::Empty));
    assert_eq!(manager.cell_at("t2", 0, 0), Ok(Cell::Occupied(Stone::Black)));
    assert_eq!(
        manager.make_move("eve", 1, 1),
        Err(GameError::NoActiveSession("eve".to_string()))
    );
    assert_eq!(manager.lookup_session("dave"), Ok("t2".to_string()));
}

#[test]
fn test_timeout_through_registry() {
    let (manager, clock) = setup();
    seated_and_started(&manager);

    clock.advance(TimeDelta::seconds(30));
    assert_eq!(manager.remaining_turn_time("t1"), Ok(TimeDelta::seconds(30)));
    assert_eq!(
        manager.end_game_on_timeout("t1"),
        Err(GameError::TurnStillActive)
    );

    clock.advance(TimeDelta::seconds(31));
    assert_eq!(manager.make_move("alice", 7, 7), Err(GameError::TurnTimedOut));

    let outcome = manager.end_game_on_timeout("t1").unwrap();
    assert_eq!(outcome.winner, "bob");
    assert_eq!(outcome.reason, EndReason::Timeout);
    assert_eq!(manager.winner("t1"), Ok("bob".to_string()));
    assert_eq!(manager.snapshot("t1").unwrap().status(), Status::Ended);
}

#[test]
fn test_seats_released_after_game_ends() {
    let (manager, clock) = setup();
    seated_and_started(&manager);

    let mut outcome = None;
    for col in 0..5 {
        clock.advance(TimeDelta::seconds(1));
        outcome = Some(manager.make_move("alice", 7, col).unwrap());
        if col < 4 {
            manager.make_move("bob", 0, col * 2).unwrap();
        }
    }
    assert!(matches!(outcome, Some(MoveOutcome::GameOver(_))));

    assert_eq!(
        manager.lookup_session("alice"),
        Err(GameError::NoActiveSession("alice".to_string()))
    );
    assert_eq!(
        manager.make_move("bob", 3, 3),
        Err(GameError::NoActiveSession("bob".to_string()))
    );
    // The finished game remains queryable
    assert_eq!(manager.winner("t1"), Ok("alice".to_string()));

    // Both may sit down somewhere else
    manager.join("t2", "bob", Stone::Black).unwrap();
    manager.join("t2", "alice", Stone::White).unwrap();
    manager.start_game("t2", "bob").unwrap();
}

#[test]
fn test_revoke_through_registry() {
    let (manager, clock) = setup();
    seated_and_started(&manager);

    clock.advance(TimeDelta::seconds(2));
    manager.make_move("alice", 7, 7).unwrap();
    clock.advance(TimeDelta::seconds(3));
    manager.request_revoke("alice").unwrap();
    assert_eq!(
        manager.request_revoke("alice"),
        Err(GameError::RevokePending)
    );
    assert_eq!(
        manager.answer_revoke("alice", true),
        Err(GameError::NotYourTurn("alice".to_string()))
    );

    clock.advance(TimeDelta::seconds(1));
    assert_eq!(manager.answer_revoke("bob", true), Ok(RevokeState::Approved));
    assert_eq!(manager.cell_at("t1", 7, 7), Ok(Cell::Empty));
    assert_eq!(manager.current_turn_player("t1"), Ok("alice".to_string()));
    assert_eq!(manager.remaining_turn_time("t1"), Ok(TimeDelta::seconds(60)));
}

#[test]
fn test_queries_before_game_exists() {
    let (manager, _clock) = setup();
    manager.create_session("t1".to_string()).unwrap();
    assert_eq!(manager.winner("t1"), Err(GameError::NoWinnerYet));
    assert_eq!(
        manager.current_turn_player("t1"),
        Err(GameError::WaitingForOpponent)
    );
    assert_eq!(
        manager.winner("missing"),
        Err(GameError::SessionNotFound("missing".to_string()))
    );
}

#[test]
fn test_custom_session_limits() {
    let (manager, clock) = setup();
    manager
        .create_session_with("blitz".to_string(), GameConfig::new(5, 3, 2))
        .unwrap();
    manager.join("blitz", "alice", Stone::Black).unwrap();
    manager.join("blitz", "bob", Stone::White).unwrap();
    manager.start_game("blitz", "alice").unwrap();

    clock.advance(TimeDelta::seconds(6));
    let outcome = manager.end_game_on_timeout("blitz").unwrap();
    assert_eq!(outcome.winning_stone, Stone::White);
}

#[test]
fn test_join_started_table_rejected() {
    let (manager, clock) = setup();
    seated_and_started(&manager);
    assert_eq!(
        manager.join("t1", "carol", Stone::White),
        Err(GameError::AlreadyStarted)
    );

    clock.advance(TimeDelta::seconds(61));
    manager.end_game_on_timeout("t1").unwrap();
    // Seats are free again, but the finished table stays closed
    assert_eq!(
        manager.join("t1", "carol", Stone::Black),
        Err(GameError::AlreadyStarted)
    );
}

#[test]
fn test_remove_session() {
    let (manager, clock) = setup();
    seated_and_started(&manager);
    clock.advance(TimeDelta::seconds(61));
    manager.end_game_on_timeout("t1").unwrap();

    let table = manager.remove_session("t1").unwrap();
    assert_eq!(
        table.game.as_ref().map(|game| game.winner().cloned()),
        Some(Ok("bob".to_string()))
    );
    assert!(manager.list_sessions().unwrap().is_empty());
    assert_eq!(
        manager.remove_session("t1"),
        Err(GameError::SessionNotFound("t1".to_string()))
    );
}

#[test]
fn test_remove_live_session_frees_seats() {
    let (manager, _clock) = setup();
    seated_and_started(&manager);
    manager.remove_session("t1").unwrap();

    assert_eq!(
        manager.lookup_session("alice"),
        Err(GameError::NoActiveSession("alice".to_string()))
    );
    manager.join("t2", "alice", Stone::Black).unwrap();
}

/// Clock that replays a fixed list of times. A read marked `pause` reports
/// itself on `reached` and then stalls before returning.
#[derive(Debug)]
struct ScriptedClock {
    script: Mutex<VecDeque<(DateTime<Utc>, bool)>>,
    reached: Mutex<mpsc::Sender<()>>,
}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        let (time, pause) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("clock read more often than scripted");
        if pause {
            self.reached.lock().unwrap().send(()).unwrap();
            thread::sleep(Duration::from_millis(200));
        }
        time
    }
}

#[test]
fn test_time_is_read_under_the_registry_lock() {
    let t0 = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000);
    let (reached_tx, reached_rx) = mpsc::channel();
    let clock = ScriptedClock {
        script: Mutex::new(VecDeque::from([
            (t0, false),
            (t0 + TimeDelta::seconds(50), true),
            (t0 + TimeDelta::seconds(70), false),
        ])),
        reached: Mutex::new(reached_tx),
    };
    let manager = SessionManager::with_clock(Arc::new(clock), GameConfig::default());
    seated_and_started(&manager);

    // Alice's move reads t0+50 and stalls. A timeout claim made meanwhile
    // reads t0+70 and must be judged against her committed move.
    let mover = manager.clone();
    let alice = thread::spawn(move || mover.make_move("alice", 7, 7));
    reached_rx.recv().unwrap();
    let claimer = manager.clone();
    let claim = thread::spawn(move || claimer.end_game_on_timeout("t1"));

    assert_eq!(
        alice.join().unwrap(),
        Ok(MoveOutcome::Continue {
            next: "bob".to_string()
        })
    );
    assert_eq!(claim.join().unwrap(), Err(GameError::TurnStillActive));

    let game = manager.snapshot("t1").unwrap();
    assert_eq!(game.status(), Status::Active);
    assert_eq!(game.last_move_time(), t0 + TimeDelta::seconds(50));
}
