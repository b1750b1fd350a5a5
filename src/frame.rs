use decor_core::{
    DecorativeField, FieldError, FieldRenderer, FieldResult, FrameScheduler, LiveMount,
    RenderLoop,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type StoppedHook = Rc<RefCell<Option<Box<dyn FnOnce(FieldError)>>>>;

/// `requestAnimationFrame` behind the core scheduler trait.
///
/// The callback itself lives in a shared slot installed by `LiveField`; the
/// scheduler only hands it to the browser and cancels by handle.
pub struct RafScheduler {
    window: web::Window,
    callback: TickSlot,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> FieldResult<i32> {
        let slot = self.callback.borrow();
        let cb = slot
            .as_ref()
            .ok_or_else(|| FieldError::Scheduler("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

/// Host clock on the same timeline as rAF timestamps, in seconds.
#[inline]
pub fn now_sec() -> f64 {
    instant::now() / 1000.0
}

pub type SharedLoop<F, R> = Rc<RefCell<RenderLoop<F, RafScheduler, R>>>;

/// A mounted field: its render loop plus the rAF closure driving it.
pub struct LiveField<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    render_loop: SharedLoop<F, R>,
    tick: TickSlot,
    stopped: StoppedHook,
}

impl<F, R> LiveField<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    /// Wire the rAF closure and mount. Fails soft: the caller decides what
    /// to show instead.
    pub fn start<B>(field: F, build: B) -> FieldResult<Self>
    where
        B: FnOnce(&F) -> FieldResult<R>,
    {
        let window = web::window().ok_or_else(|| FieldError::Scheduler("no window".into()))?;
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window,
            callback: tick.clone(),
        };
        let render_loop: SharedLoop<F, R> = Rc::new(RefCell::new(RenderLoop::new(field, scheduler)));
        let stopped: StoppedHook = Rc::new(RefCell::new(None));
        install_tick(&tick, Rc::downgrade(&render_loop), stopped.clone());
        render_loop.borrow_mut().mount(build, now_sec())?;
        Ok(Self {
            render_loop,
            tick,
            stopped,
        })
    }

    pub fn reconfigure<B>(&self, field: F, build: B) -> FieldResult<()>
    where
        B: FnOnce(&F) -> FieldResult<R>,
    {
        self.render_loop
            .borrow_mut()
            .reconfigure(field, build, now_sec())
    }

    /// Run `hook` once if the loop stops itself, e.g. on a lost surface.
    pub fn on_stopped(&self, hook: impl FnOnce(FieldError) + 'static) {
        *self.stopped.borrow_mut() = Some(Box::new(hook));
    }
}

impl<F, R> LiveMount for LiveField<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    fn is_running(&self) -> bool {
        self.render_loop.borrow().is_mounted()
    }

    fn stop(self) {
        self.stopped.borrow_mut().take();
        self.render_loop.borrow_mut().unmount();
        // never called from inside a tick, so the closure is not running
        self.tick.borrow_mut().take();
    }
}

fn install_tick<F, R>(
    slot: &TickSlot,
    render_loop: Weak<RefCell<RenderLoop<F, RafScheduler, R>>>,
    stopped: StoppedHook,
) where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    let mut stats = FrameStats::new();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let Some(lp) = render_loop.upgrade() else {
            return;
        };
        let ticked = lp.borrow_mut().tick(timestamp_ms / 1000.0);
        if let Err(e) = ticked {
            log::warn!("[loop] frame failed: {}", e);
            let hook = if lp.borrow().is_mounted() {
                None
            } else {
                stopped.borrow_mut().take()
            };
            if let Some(hook) = hook {
                hook(e);
            }
        }
        stats.record();
    }) as Box<dyn FnMut(f64)>));
}

/// Debug-level frame rate log, once every few seconds.
struct FrameStats {
    window_start: Instant,
    frames: u32,
}

impl FrameStats {
    const REPORT_EVERY_SEC: f32 = 5.0;

    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }

    fn record(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= Self::REPORT_EVERY_SEC {
            log::debug!("[loop] {:.1} fps", self.frames as f32 / elapsed);
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}
