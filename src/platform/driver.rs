//! Simulation loop driver
//!
//! One tick per scheduled frame: apply resize, snapshot input, tick, route
//! events to audio, draw, request the next frame. Host specifics (frame
//! scheduling, drawing, sound) come in through traits so the same driver
//! runs in the browser, headless, and under test.

use crate::audio::{Cue, CueDispatcher};
use crate::renderer::{Scene, Surface};
use crate::sim::{Game, GameEvent};

use super::input::InputSlot;

/// Host frame request id (`requestAnimationFrame` handle in the browser)
pub type FrameHandle = i32;

/// Schedules the next frame invocation
pub trait FrameScheduler {
    /// Ask for one more frame; None if the host refused
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand (native runs and tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: FrameHandle,
    /// Outstanding request, if any
    pub pending: Option<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.pending = Some(self.next);
        self.pending
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

pub struct LoopDriver<G, S, A, F> {
    game: G,
    surface: S,
    audio: A,
    scheduler: F,
    input: InputSlot,
    pending: Option<FrameHandle>,
    running: bool,
    engine_on: bool,
}

impl<G, S, A, F> LoopDriver<G, S, A, F>
where
    G: Game + Scene,
    S: Surface,
    A: CueDispatcher,
    F: FrameScheduler,
{
    pub fn new(game: G, surface: S, audio: A, scheduler: F) -> Self {
        Self {
            game,
            surface,
            audio,
            scheduler,
            input: InputSlot::default(),
            pending: None,
            running: false,
            engine_on: false,
        }
    }

    /// Begin the frame loop
    pub fn launch(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = self.scheduler.request_frame();
    }

    /// Run one frame. Returns false (and touches nothing) once stopped.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.pending = None;

        let (mut input, resize) = self.input.take();
        if let Some(extent) = resize {
            self.game.resize(extent);
        }
        let extent = self.game.extent();
        input.pointer = input.pointer.map(|p| extent.clamp(p));
        input.press = input.press.map(|p| extent.clamp(p));

        self.game.tick(&input);
        self.dispatch_events();
        if self.engine_on {
            if let Some(speed) = self.game.engine_speed() {
                self.audio.retarget_engine(speed);
            }
        }

        self.game.draw(&mut self.surface);
        self.pending = self.scheduler.request_frame();
        true
    }

    fn dispatch_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::Popped { pitch, .. } => self.audio.play(Cue::Pop { freq: pitch }),
                GameEvent::Crashed { .. } => {
                    self.stop_engine();
                    self.audio.play(Cue::Crash);
                }
                GameEvent::Started | GameEvent::Scored { .. } => {}
            }
        }
    }

    fn stop_engine(&mut self) {
        if self.engine_on {
            self.audio.stop_engine();
            self.engine_on = false;
        }
    }

    /// Start/restart action from the host UI
    pub fn start(&mut self) {
        self.audio.init();
        self.game.start();
        match self.game.engine_speed() {
            // Already droning: a start mid-run changes nothing
            Some(_) if self.engine_on => {}
            Some(speed) => {
                self.audio.start_engine(speed);
                self.engine_on = true;
            }
            None => self.stop_engine(),
        }
    }

    /// Tear down: cancel the pending frame and silence the engine.
    /// Frames delivered afterwards are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.stop_engine();
    }

    /// Flip mute; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        muted
    }

    pub fn input_mut(&mut self) -> &mut InputSlot {
        &mut self.input
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}
