//! Phase state machine
//!
//! A dispatch table from [`GamePhase`] to enter/update/exit handlers. Handlers
//! are plain function pointers over a context type, and an update handler
//! requests a transition by returning the target phase instead of calling
//! back into the machine.

use super::state::GamePhase;

pub type EnterHandler<C> = fn(&mut C, Option<GamePhase>);
pub type UpdateHandler<C> = fn(&mut C, f64, f32) -> Option<GamePhase>;
pub type ExitHandler<C> = fn(&mut C, GamePhase);

/// Handlers for one phase; every slot is optional
pub struct PhaseHandlers<C> {
    /// Receives the phase being left (`None` when the machine starts)
    pub on_enter: Option<EnterHandler<C>>,
    /// Receives `(time_ms, delta_ms)`; returns a phase to transition to
    pub on_update: Option<UpdateHandler<C>>,
    /// Receives the phase being entered
    pub on_exit: Option<ExitHandler<C>>,
}

impl<C> PhaseHandlers<C> {
    pub const fn empty() -> Self {
        Self {
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }
}

impl<C> Default for PhaseHandlers<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Clone for PhaseHandlers<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for PhaseHandlers<C> {}

pub struct StateMachine<C> {
    current: GamePhase,
    handlers: [Option<PhaseHandlers<C>>; GamePhase::COUNT],
}

impl<C> StateMachine<C> {
    pub fn new(initial: GamePhase) -> Self {
        Self {
            current: initial,
            handlers: [None; GamePhase::COUNT],
        }
    }

    pub fn add_phase(&mut self, phase: GamePhase, handlers: PhaseHandlers<C>) {
        self.handlers[phase.index()] = Some(handlers);
    }

    pub fn is_registered(&self, phase: GamePhase) -> bool {
        self.handlers[phase.index()].is_some()
    }

    pub fn current(&self) -> GamePhase {
        self.current
    }

    fn handlers(&self, phase: GamePhase) -> Option<PhaseHandlers<C>> {
        self.handlers[phase.index()]
    }

    /// Run the initial phase's enter handler
    pub fn start(&mut self, ctx: &mut C) {
        log::info!("Starting in '{}'", self.current.as_str());
        if let Some(enter) = self.handlers(self.current).and_then(|h| h.on_enter) {
            enter(ctx, None);
        }
    }

    /// Exit the current phase and enter `target`
    ///
    /// Returns false, leaving the machine untouched, if `target` has no
    /// registered handlers.
    pub fn transition(&mut self, ctx: &mut C, target: GamePhase) -> bool {
        let Some(target_handlers) = self.handlers(target) else {
            log::warn!("Phase '{}' not registered", target.as_str());
            return false;
        };

        let from = self.current;
        if let Some(exit) = self.handlers(from).and_then(|h| h.on_exit) {
            exit(ctx, target);
        }

        log::info!("Changing phase from '{}' to '{}'", from.as_str(), target.as_str());
        self.current = target;

        if let Some(enter) = target_handlers.on_enter {
            enter(ctx, Some(from));
        }
        true
    }

    /// Run the current phase's update handler, then any transition it asked for
    ///
    /// Returns the phase entered, if a transition happened.
    pub fn tick(&mut self, ctx: &mut C, time_ms: f64, delta_ms: f32) -> Option<GamePhase> {
        let update = self.handlers(self.current).and_then(|h| h.on_update)?;
        let target = update(ctx, time_ms, delta_ms)?;
        self.transition(ctx, target).then_some(target)
    }
}
