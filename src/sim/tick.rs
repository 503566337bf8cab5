//! Phase handlers
//!
//! The enter/update/exit side effects of every [`GamePhase`], wired into a
//! [`StateMachine`] over the [`Session`] aggregate.

use super::collision::check_collision;
use super::fsm::{EnterHandler, ExitHandler, PhaseHandlers, StateMachine, UpdateHandler};
use super::listeners::{DelayedAction, InputAction};
use super::state::{GameEvent, GamePhase, Session};

/// Top edge of the playfield; the actor's center going above it ends the run
const TOP_BOUNDARY: f32 = 0.0;

/// Build the machine with all four phases registered, parked in PRESTART
pub fn build_state_machine() -> StateMachine<Session> {
    let mut fsm = StateMachine::new(GamePhase::PreStart);
    fsm.add_phase(
        GamePhase::PreStart,
        PhaseHandlers {
            on_enter: Some(prestart_enter as EnterHandler<Session>),
            on_update: None,
            on_exit: Some(prestart_exit as ExitHandler<Session>),
        },
    );
    fsm.add_phase(
        GamePhase::Running,
        PhaseHandlers {
            on_enter: Some(running_enter as EnterHandler<Session>),
            on_update: Some(running_update as UpdateHandler<Session>),
            on_exit: Some(running_exit as ExitHandler<Session>),
        },
    );
    fsm.add_phase(
        GamePhase::GameOver,
        PhaseHandlers {
            on_enter: Some(gameover_enter as EnterHandler<Session>),
            on_update: None,
            on_exit: Some(gameover_exit as ExitHandler<Session>),
        },
    );
    fsm.add_phase(
        GamePhase::Paused,
        PhaseHandlers {
            on_enter: Some(paused_enter as EnterHandler<Session>),
            on_update: None,
            on_exit: Some(paused_exit as ExitHandler<Session>),
        },
    );
    fsm
}

fn prestart_enter(session: &mut Session, _from: Option<GamePhase>) {
    session.events.push(GameEvent::PhaseEntered(GamePhase::PreStart));
    session.scores.reset(&mut session.events);
    session.actor.deactivate();
    session.spawner.stop_and_clear(&mut session.events);
    session.listeners.once(GamePhase::PreStart, InputAction::Start);
}

fn prestart_exit(session: &mut Session, _to: GamePhase) {
    session.listeners.revoke_phase(GamePhase::PreStart);
    session.events.push(GameEvent::PhaseExited(GamePhase::PreStart));
}

fn running_enter(session: &mut Session, from: Option<GamePhase>) {
    session.events.push(GameEvent::PhaseEntered(GamePhase::Running));
    if from == Some(GamePhase::Paused) {
        // Resumed: PAUSED's exit already restored motion
        return;
    }
    session.actor.reset(&session.config.actor);
    session.spawner.start(&mut session.rng, &mut session.events);
    session.scores.start_music(&mut session.events);
    log::info!("Run started (seed {})", session.seed);
}

fn running_update(session: &mut Session, time_ms: f64, delta_ms: f32) -> Option<GamePhase> {
    let height = session.config.playfield.height;
    let ground_y = session.config.playfield.ground_y();

    session.actor.update(time_ms, delta_ms, height);
    session
        .spawner
        .update(delta_ms, &mut session.rng, &mut session.events);
    session
        .scores
        .check(&session.actor, &mut session.spawner, &mut session.events);

    let hit = check_collision(
        &session.actor,
        session.spawner.pairs(),
        ground_y,
        TOP_BOUNDARY,
    )?;
    log::info!("Collision: {hit:?} at score {}", session.score());
    session.events.push(GameEvent::CollisionOccurred(hit));
    Some(GamePhase::GameOver)
}

fn running_exit(session: &mut Session, to: GamePhase) {
    session.events.push(GameEvent::PhaseExited(GamePhase::Running));
    if to == GamePhase::Paused {
        return;
    }
    session.actor.deactivate();
    session.scores.stop_music(&mut session.events);
    if to == GamePhase::GameOver {
        // The tableau stays on screen, frozen, until the next PRESTART
        session.spawner.pause_timer();
    } else {
        session.spawner.stop_and_clear(&mut session.events);
    }
}

fn gameover_enter(session: &mut Session, _from: Option<GamePhase>) {
    session.events.push(GameEvent::PhaseEntered(GamePhase::GameOver));
    session.actor.freeze();
    session.spawner.pause_timer();
    if session.commit_high_score() {
        log::info!("New high score: {}", session.high_score);
    }
    log::info!("Game over with score {}", session.score());
    session
        .scheduler
        .after(session.config.timing.restart_delay_ms, DelayedAction::ArmRestart);
}

fn gameover_exit(session: &mut Session, _to: GamePhase) {
    session.listeners.revoke_phase(GamePhase::GameOver);
    session.events.push(GameEvent::PhaseExited(GamePhase::GameOver));
}

fn paused_enter(session: &mut Session, _from: Option<GamePhase>) {
    session.events.push(GameEvent::PhaseEntered(GamePhase::Paused));
    session.actor.suspend();
    session.spawner.freeze();
    session.listeners.once(GamePhase::Paused, InputAction::Resume);
}

fn paused_exit(session: &mut Session, _to: GamePhase) {
    session.listeners.revoke_phase(GamePhase::Paused);
    session.actor.resume();
    session.spawner.thaw();
    session.events.push(GameEvent::PhaseExited(GamePhase::Paused));
}
