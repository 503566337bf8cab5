//! One-shot input subscriptions and delayed calls
//!
//! Both are plain data advanced synchronously from the frame driver: a
//! listener is revoked the moment it is consumed, and a delayed call fires
//! from the first tick whose timestamp reaches its due time.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// What a consumed "activate" input means in the phase that armed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    Start,
    Restart,
    Resume,
}

/// Handle to an armed listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OneShot {
    id: ListenerId,
    phase: GamePhase,
    action: InputAction,
}

/// Armed one-shot listeners, at most one per phase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputListeners {
    next_id: u64,
    armed: Vec<OneShot>,
}

impl InputListeners {
    /// Arm a listener for `phase`, replacing any listener already armed there
    pub fn once(&mut self, phase: GamePhase, action: InputAction) -> ListenerId {
        self.revoke_phase(phase);
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.armed.push(OneShot { id, phase, action });
        id
    }

    pub fn revoke(&mut self, id: ListenerId) -> bool {
        let before = self.armed.len();
        self.armed.retain(|l| l.id != id);
        self.armed.len() != before
    }

    pub fn revoke_phase(&mut self, phase: GamePhase) {
        self.armed.retain(|l| l.phase != phase);
    }

    /// Consume the listener armed for `phase`, detaching it
    pub fn consume(&mut self, phase: GamePhase) -> Option<InputAction> {
        let index = self.armed.iter().position(|l| l.phase == phase)?;
        Some(self.armed.remove(index).action)
    }

    pub fn is_armed(&self, phase: GamePhase) -> bool {
        self.armed.iter().any(|l| l.phase == phase)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

/// Work deferred by a phase handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedAction {
    /// Enter RUNNING, if still in PRESTART
    BeginRun,
    /// Arm the restart listener, if still in GAMEOVER
    ArmRestart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DelayedCall {
    due_ms: f64,
    action: DelayedAction,
}

/// Delayed calls keyed on the frame driver's timestamps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: f64,
    pending: Vec<DelayedCall>,
}

impl Scheduler {
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward; timestamps going backwards are ignored
    pub fn set_now(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    pub fn after(&mut self, delay_ms: f64, action: DelayedAction) {
        self.pending.push(DelayedCall {
            due_ms: self.now_ms + delay_ms.max(0.0),
            action,
        });
    }

    /// Remove and return every call that is due, earliest first
    pub fn take_due(&mut self) -> Vec<DelayedAction> {
        let now = self.now_ms;
        let mut due: Vec<DelayedCall> = Vec::new();
        self.pending.retain(|call| {
            if call.due_ms <= now {
                due.push(call.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|call| call.action).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_fires_once() {
        let mut listeners = InputListeners::default();
        listeners.once(GamePhase::PreStart, InputAction::Start);
        assert_eq!(listeners.consume(GamePhase::PreStart), Some(InputAction::Start));
        assert_eq!(listeners.consume(GamePhase::PreStart), None);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_rearming_does_not_stack() {
        let mut listeners = InputListeners::default();
        for _ in 0..5 {
            listeners.once(GamePhase::Paused, InputAction::Resume);
        }
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_listener_only_answers_its_phase() {
        let mut listeners = InputListeners::default();
        listeners.once(GamePhase::GameOver, InputAction::Restart);
        assert_eq!(listeners.consume(GamePhase::PreStart), None);
        assert!(listeners.is_armed(GamePhase::GameOver));
    }

    #[test]
    fn test_revoke_by_handle() {
        let mut listeners = InputListeners::default();
        let id = listeners.once(GamePhase::PreStart, InputAction::Start);
        assert!(listeners.revoke(id));
        assert!(!listeners.revoke(id));
        assert!(!listeners.is_armed(GamePhase::PreStart));
    }

    #[test]
    fn test_scheduler_due_order() {
        let mut scheduler = Scheduler::default();
        scheduler.set_now(1000.0);
        scheduler.after(500.0, DelayedAction::ArmRestart);
        scheduler.after(100.0, DelayedAction::BeginRun);

        scheduler.set_now(1099.0);
        assert!(scheduler.take_due().is_empty());

        scheduler.set_now(1600.0);
        assert_eq!(
            scheduler.take_due(),
            vec![DelayedAction::BeginRun, DelayedAction::ArmRestart]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_scheduler_clock_is_monotonic() {
        let mut scheduler = Scheduler::default();
        scheduler.set_now(50.0);
        scheduler.set_now(10.0);
        assert_eq!(scheduler.now_ms(), 50.0);
    }
}
