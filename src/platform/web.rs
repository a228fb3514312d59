//! Browser glue: frame scheduling, listener registry and mounting
//!
//! A mounted game is a reference cycle on purpose (driver -> scheduler ->
//! frame closure -> driver). [`Mount::unmount`] breaks it.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent};

use super::GameKind;
use super::driver::{FrameHandle, FrameScheduler, LoopDriver};
use crate::audio::WebAudio;
use crate::renderer::{CanvasSurface, Scene};
use crate::settings::Settings;
use crate::sim::{Extent, Game, RacerState, RealmState, SessionPhase};
use crate::tuning::Tuning;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler
pub struct RafScheduler {
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(callback: FrameCallback) -> Self {
        Self { callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            window.cancel_animation_frame(handle).ok();
        }
    }
}

/// Attached DOM listeners; all are removed on detach or drop
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    /// Attach `handler` for events of concrete type `E` (others are ignored)
    pub fn add<E, H>(&mut self, target: &EventTarget, event: &'static str, mut handler: H)
    where
        E: JsCast + 'static,
        H: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not attach {} listener", event);
            return;
        }
        self.entries.push((target.clone(), event, closure));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn detach_all(&mut self) {
        for (target, event, closure) in self.entries.drain(..) {
            target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// A running game attached to a canvas
pub struct Mount {
    kind: GameKind,
    listeners: Listeners,
    frame_callback: FrameCallback,
    stop: Box<dyn FnMut()>,
}

impl Mount {
    /// Stop the loop, detach every listener and release the frame closure
    pub fn unmount(mut self) {
        (self.stop)();
        self.listeners.detach_all();
        self.frame_callback.borrow_mut().take();
        log::info!("Unmounted {}", self.kind.as_str());
    }
}

/// Mount `kind` on `canvas` and start its frame loop
pub fn mount(
    canvas: HtmlCanvasElement,
    kind: GameKind,
    seed: u64,
    tuning: &Tuning,
    settings: &Settings,
) -> Option<Mount> {
    log::info!("Mounting {} (seed {})", kind.as_str(), seed);
    match kind {
        GameKind::Realm => {
            let tuning = tuning.realm.clone();
            mount_with(canvas, kind, settings, move |extent| {
                RealmState::new(seed, extent, tuning)
            })
        }
        GameKind::Racer => {
            let tuning = tuning.racer.clone();
            mount_with(canvas, kind, settings, move |extent| {
                RacerState::new(seed, extent, tuning)
            })
        }
    }
}

fn phase_name(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Playing => "playing",
        SessionPhase::Ended => "ended",
    }
}

/// Mirror score and phase into the page
fn update_hud(canvas: &HtmlCanvasElement, score: u64, phase: SessionPhase) {
    canvas.set_attribute("data-phase", phase_name(phase)).ok();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = document.get_element_by_id("score") {
        el.set_text_content(Some(&score.to_string()));
    }
}

fn mount_with<G, M>(
    canvas: HtmlCanvasElement,
    kind: GameKind,
    settings: &Settings,
    make: M,
) -> Option<Mount>
where
    G: Game + Scene + 'static,
    M: FnOnce(Extent) -> G,
{
    let surface = CanvasSurface::new(canvas.clone(), settings.glow)?;
    let extent = surface.fit_to_element();
    let game = make(extent);

    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    let driver = Rc::new(RefCell::new(LoopDriver::new(
        game,
        surface,
        WebAudio::new(settings),
        RafScheduler::new(frame_callback.clone()),
    )));

    {
        let driver = driver.clone();
        let canvas = canvas.clone();
        let mut last = None;
        *frame_callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            let mut d = driver.borrow_mut();
            if !d.frame() {
                return;
            }
            let hud = (d.game().score(), d.game().phase());
            if last != Some(hud) {
                update_hud(&canvas, hud.0, hud.1);
                last = Some(hud);
            }
        }));
    }

    let mut listeners = Listeners::default();
    let canvas_target: &EventTarget = canvas.as_ref();

    {
        let driver = driver.clone();
        listeners.add(canvas_target, "pointermove", move |e: PointerEvent| {
            let pos = Vec2::new(e.offset_x() as f32, e.offset_y() as f32);
            driver.borrow_mut().input_mut().pointer_moved(pos);
        });
    }
    {
        let driver = driver.clone();
        listeners.add(canvas_target, "pointerdown", move |e: PointerEvent| {
            let pos = Vec2::new(e.offset_x() as f32, e.offset_y() as f32);
            driver.borrow_mut().input_mut().pointer_pressed(pos);
        });
    }
    {
        let driver = driver.clone();
        listeners.add(canvas_target, "pointerleave", move |_e: PointerEvent| {
            driver.borrow_mut().input_mut().pointer_left();
        });
    }

    let window = web_sys::window()?;
    let window_target: &EventTarget = window.as_ref();
    {
        let driver = driver.clone();
        listeners.add(window_target, "keydown", move |e: KeyboardEvent| {
            if driver.borrow_mut().input_mut().key_down(&e.code()) {
                e.prevent_default();
            }
        });
    }
    {
        let driver = driver.clone();
        listeners.add(window_target, "keyup", move |e: KeyboardEvent| {
            driver.borrow_mut().input_mut().key_up(&e.code());
        });
    }
    {
        let driver = driver.clone();
        listeners.add(window_target, "resize", move |_e: Event| {
            let mut d = driver.borrow_mut();
            let extent = d.surface().fit_to_element();
            d.input_mut().resized(extent);
        });
    }

    if let Some(document) = window.document() {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let driver = driver.clone();
                listeners.add(btn.as_ref(), "click", move |_e: Event| {
                    driver.borrow_mut().start();
                });
            }
        }
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let driver = driver.clone();
            let mut settings = settings.clone();
            listeners.add(btn.as_ref(), "click", move |_e: Event| {
                settings.muted = driver.borrow_mut().toggle_mute();
                settings.save();
            });
        }
    }

    driver.borrow_mut().launch();
    log::info!("{} listeners attached", listeners.len());

    let stop: Box<dyn FnMut()> = {
        let driver = driver.clone();
        Box::new(move || driver.borrow_mut().stop())
    };

    Some(Mount {
        kind,
        listeners,
        frame_callback,
        stop,
    })
}
