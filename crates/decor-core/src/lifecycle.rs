//! Mount / tick / unmount state machine for one field instance.
//!
//! The loop owns the frame callback and the renderer. The host plugs in a
//! `FrameScheduler` (requestAnimationFrame on the web, a counter in tests)
//! and a renderer factory; the loop guarantees at most one pending callback
//! and symmetric teardown no matter how often mount and unmount are called.

use crate::clock::AnimationClock;
use crate::error::{FieldError, FieldResult};
use crate::field::DecorativeField;
use std::fmt;

/// Host facility that calls back once per display refresh.
pub trait FrameScheduler {
    type Handle: Copy + fmt::Debug;

    fn request_frame(&mut self) -> FieldResult<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns every graphics resource of one mounted field.
pub trait FieldRenderer<Frame> {
    fn render(&mut self, frame: &Frame) -> FieldResult<()>;

    /// Free geometry, materials and the rendering context, and detach the
    /// surface. Called exactly once per successful mount.
    fn release(&mut self);
}

enum LoopState<H, R> {
    Unmounted,
    Mounted {
        renderer: R,
        pending: Option<H>,
        clock: AnimationClock,
        frames: u64,
    },
}

pub struct RenderLoop<F, S, R>
where
    F: DecorativeField,
    S: FrameScheduler,
    R: FieldRenderer<F::Frame>,
{
    field: F,
    scheduler: S,
    frame: F::Frame,
    state: LoopState<S::Handle, R>,
}

impl<F, S, R> RenderLoop<F, S, R>
where
    F: DecorativeField,
    S: FrameScheduler,
    R: FieldRenderer<F::Frame>,
{
    pub fn new(field: F, scheduler: S) -> Self {
        Self {
            field,
            scheduler,
            frame: F::Frame::default(),
            state: LoopState::Unmounted,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, LoopState::Mounted { .. })
    }

    pub fn pending_frame(&self) -> Option<S::Handle> {
        match &self.state {
            LoopState::Mounted { pending, .. } => *pending,
            LoopState::Unmounted => None,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        match &self.state {
            LoopState::Mounted { frames, .. } => *frames,
            LoopState::Unmounted => 0,
        }
    }

    /// Build the renderer and start the frame callback.
    ///
    /// Mounting an already mounted loop tears the old mount down first. On
    /// any failure the loop is left unmounted with nothing pending.
    pub fn mount<B>(&mut self, build: B, now_sec: f64) -> FieldResult<()>
    where
        B: FnOnce(&F) -> FieldResult<R>,
    {
        self.unmount();
        let mut renderer = match build(&self.field) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[loop] mount failed: {}", e);
                return Err(e);
            }
        };
        let handle = match self.scheduler.request_frame() {
            Ok(h) => h,
            Err(e) => {
                log::warn!("[loop] could not schedule first frame: {}", e);
                renderer.release();
                return Err(e);
            }
        };
        log::debug!(
            "[loop] mounted with {} elements",
            self.field.element_count()
        );
        self.state = LoopState::Mounted {
            renderer,
            pending: Some(handle),
            clock: AnimationClock::starting_at(now_sec),
            frames: 0,
        };
        Ok(())
    }

    /// Run one frame: transform, render once, reschedule.
    ///
    /// A tick that arrives after unmount is ignored.
    pub fn tick(&mut self, now_sec: f64) -> FieldResult<()> {
        let LoopState::Mounted {
            renderer,
            pending,
            clock,
            frames,
        } = &mut self.state
        else {
            return Ok(());
        };
        *pending = None;
        self.field.write_frame(clock.elapsed(now_sec), &mut self.frame);
        let outcome = match renderer.render(&self.frame) {
            Ok(()) => {
                *frames += 1;
                self.scheduler.request_frame().map(|h| *pending = Some(h))
            }
            Err(FieldError::SurfaceLost) => Err(FieldError::SurfaceLost),
            Err(e) => {
                log::warn!("[loop] render error: {}", e);
                self.scheduler.request_frame().map(|h| *pending = Some(h))
            }
        };
        if let Err(e) = &outcome {
            log::warn!("[loop] stopping: {}", e);
            self.unmount();
        }
        outcome
    }

    /// Cancel the pending callback and release every resource.
    ///
    /// Safe to call at any time; returns whether anything was torn down.
    pub fn unmount(&mut self) -> bool {
        match std::mem::replace(&mut self.state, LoopState::Unmounted) {
            LoopState::Unmounted => false,
            LoopState::Mounted {
                mut renderer,
                pending,
                frames,
                ..
            } => {
                if let Some(h) = pending {
                    self.scheduler.cancel_frame(h);
                }
                renderer.release();
                log::debug!("[loop] unmounted after {} frames", frames);
                true
            }
        }
    }

    /// Replace the field and remount. Elements are never edited in place.
    pub fn reconfigure<B>(&mut self, field: F, build: B, now_sec: f64) -> FieldResult<()>
    where
        B: FnOnce(&F) -> FieldResult<R>,
    {
        self.unmount();
        self.field = field;
        self.frame = F::Frame::default();
        self.mount(build, now_sec)
    }
}

impl<F, S, R> Drop for RenderLoop<F, S, R>
where
    F: DecorativeField,
    S: FrameScheduler,
    R: FieldRenderer<F::Frame>,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
