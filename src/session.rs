#![cfg(feature = "std")]
//! Foreground session: input, reconciliation with the shared board, and
//! scene output, driven once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::Board;
use crate::button::{default_cell_centre, default_grid, Button};
use crate::common::{Side, Vec2};
use crate::config::{HANDSHAKE_POLL_MS, STATUS_LOG_MS};
use crate::input::{Dispatch, HitTestDispatcher, InputEvent, Viewport};
use crate::render::{draw_scene, draw_waiting, RenderAdapter, SplashPulse};
use crate::sync::SharedBoard;
use crate::timer::{FrameClock, IntervalTimer, TimerMode};
use crate::turn::{ClickOutcome, LocalTwoPlayer, MoveSink, PlayMode, RemoteAuthority, TurnStrategy};

/// Everything the frame loop owns for one game.
pub struct Session {
    board: Arc<SharedBoard>,
    ready: Arc<AtomicBool>,
    buttons: Vec<Box<dyn Button>>,
    dispatcher: HitTestDispatcher,
    strategy: Box<dyn TurnStrategy>,
    seen_generation: u64,
    view: Board,
    pulse: SplashPulse,
    clock: FrameClock,
    handshake_timer: IntervalTimer,
    status_timer: IntervalTimer,
    running: bool,
}

impl Session {
    fn with_strategy(
        strategy: Box<dyn TurnStrategy>,
        board: Arc<SharedBoard>,
        ready: Arc<AtomicBool>,
        now_ms: u32,
    ) -> Self {
        let (view, seen_generation) = board.snapshot();
        Self {
            board,
            ready,
            buttons: default_grid(),
            dispatcher: HitTestDispatcher::default(),
            strategy,
            seen_generation,
            view,
            pulse: SplashPulse::new(),
            clock: FrameClock::new(now_ms),
            handshake_timer: IntervalTimer::new(TimerMode::Loop, HANDSHAKE_POLL_MS),
            status_timer: IntervalTimer::new(TimerMode::Loop, STATUS_LOG_MS),
            running: true,
        }
    }

    /// Client of a remote authority. `board` and `ready` are written by the
    /// decode task.
    pub fn remote(
        side: Side,
        sink: Box<dyn MoveSink>,
        board: Arc<SharedBoard>,
        ready: Arc<AtomicBool>,
        now_ms: u32,
    ) -> Self {
        Self::with_strategy(Box::new(RemoteAuthority::new(side, sink)), board, ready, now_ms)
    }

    /// Two players on one screen, no network.
    pub fn local(now_ms: u32) -> Self {
        Self::with_strategy(
            Box::new(LocalTwoPlayer::new()),
            Arc::new(SharedBoard::new()),
            Arc::new(AtomicBool::new(true)),
            now_ms,
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn mode(&self) -> PlayMode {
        self.strategy.mode()
    }

    /// Board as of the last reconciliation.
    pub fn board(&self) -> &Board {
        &self.view
    }

    pub fn buttons(&self) -> &[Box<dyn Button>] {
        &self.buttons
    }

    pub fn viewport(&self) -> &Viewport {
        self.dispatcher.viewport()
    }

    pub fn strategy(&self) -> &dyn TurnStrategy {
        self.strategy.as_ref()
    }

    /// Physical position of the centre of cell `index`.
    pub fn cell_centre(&self, index: usize) -> Vec2 {
        self.viewport().to_physical(default_cell_centre(index))
    }

    /// Route one input event. Returns the click outcome for committing presses.
    pub fn handle(&mut self, event: InputEvent) -> Option<ClickOutcome> {
        match event {
            InputEvent::Quit => {
                self.running = false;
                None
            }
            InputEvent::NewGame => {
                self.new_game();
                None
            }
            _ => match self.dispatcher.dispatch(&mut self.buttons, event) {
                Dispatch::Moved(spot) => {
                    self.strategy.active_mut().pos = spot;
                    None
                }
                Dispatch::Commit(cell) => Some(self.commit(cell)),
                Dispatch::None => None,
            },
        }
    }

    fn commit(&mut self, cell: usize) -> ClickOutcome {
        if !self.is_ready() {
            return ClickOutcome::Ignored;
        }
        let strategy = &mut self.strategy;
        let button = &mut self.buttons[cell];
        let outcome = self
            .board
            .edit(|board| strategy.commit(cell, &mut **button, board));
        log::debug!("click on cell {}: {:?}", cell, outcome);
        outcome
    }

    /// Clear the board for another local game.
    pub fn new_game(&mut self) {
        if self.mode() != PlayMode::Local {
            log::info!("a new game can only be started by the authority");
            return;
        }
        self.board.edit(Board::reset);
        self.reset_buttons();
    }

    fn reset_buttons(&mut self) {
        for button in self.buttons.iter_mut() {
            button.reset();
        }
        self.strategy.new_game();
    }

    /// Advance timers and pull the latest board into the buttons.
    pub fn step(&mut self, now_ms: u32) {
        self.clock.update(now_ms);
        self.clock.drain_steps();

        if !self.is_ready() {
            self.handshake_timer.update(now_ms);
            if self.handshake_timer.just_started() {
                log::info!("waiting for authority...");
            }
            return;
        }

        self.reconcile();

        self.status_timer.update(now_ms);
        if self.status_timer.just_finished() {
            log::info!("{:?} at {} fps", self.view, self.clock.fps());
        }
    }

    fn reconcile(&mut self) {
        let (board, generation) = self.board.snapshot();
        if generation == self.seen_generation {
            return;
        }
        self.seen_generation = generation;

        if board.is_clear() && !self.view.is_clear() {
            log::info!("board cleared, starting a new game");
            self.reset_buttons();
        }
        for (button, cell) in self.buttons.iter_mut().zip(board.cells().iter()) {
            button.assign(*cell);
        }
        self.view = board;
    }

    /// Describe the current frame to `renderer` and present it.
    pub fn render(&mut self, renderer: &mut dyn RenderAdapter) {
        if !self.is_ready() {
            draw_waiting(renderer, &mut self.pulse);
            return;
        }
        draw_scene(
            renderer,
            &self.buttons,
            self.strategy.active(),
            self.strategy.local_side(),
            &self.view,
        );
    }
}
