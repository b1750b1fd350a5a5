use crate::dom;
use crate::frame::LiveField;
use crate::render::GpuDevice;
use decor_core::{
    DecorativeField, FieldError, FieldRenderer, FieldResult, MountOutcome, MountSlot,
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type Slot<F, R> = MountSlot<GpuDevice, LiveField<F, R>>;

/// A core mount slot driven by the browser: acquisition runs on the
/// microtask queue and the outcome is reflected on the host element.
pub struct FieldSlot<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    slot: Slot<F, R>,
}

impl<F, R> Clone for FieldSlot<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<F, R> FieldSlot<F, R>
where
    F: DecorativeField + 'static,
    R: FieldRenderer<F::Frame> + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: MountSlot::new(),
        }
    }

    /// Acquire a device, then let `start` build the field and its renderer.
    ///
    /// Any previous mount is stopped first. Failures mark the host with the
    /// fallback class and leave the slot idle, as does a surface lost later.
    pub fn begin<S>(&self, host: web::HtmlElement, label: &'static str, start: S)
    where
        S: FnOnce(Rc<GpuDevice>) -> FieldResult<LiveField<F, R>> + 'static,
    {
        let ticket = self.slot.begin();
        let slot = self.slot.clone();
        spawn_local(async move {
            let acquired = GpuDevice::acquire()
                .await
                .map_err(|e| FieldError::SurfaceUnavailable(e.to_string()));
            let weak = slot.downgrade();
            let stopped_host = host.clone();
            let outcome = slot.complete(ticket, acquired, move |gpu| {
                let live = start(gpu)?;
                live.on_stopped(move |e| {
                    // deferred: the tick closure that reports this must not be dropped mid-call
                    spawn_local(async move {
                        if weak.upgrade().is_some_and(|slot| slot.reap_stopped()) {
                            log::warn!("[{label}] field stopped: {e}");
                            dom::mark_fallback(&stopped_host);
                        }
                    });
                });
                Ok(live)
            });
            match outcome {
                MountOutcome::Live => dom::clear_fallback(&host),
                MountOutcome::Cancelled => {
                    log::debug!("[{label}] unmounted before the device arrived")
                }
                MountOutcome::Failed(e) => {
                    log::warn!("[{label}] mount failed: {e}");
                    dom::mark_fallback(&host);
                }
            }
        });
    }

    /// Stop whatever is running or pending. Returns whether anything was.
    pub fn stop(&self) -> bool {
        self.slot.stop()
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_running()
    }

    /// Run `f` against the live field, if there is one.
    pub fn with_live<T>(&self, f: impl FnOnce(&Rc<GpuDevice>, &LiveField<F, R>) -> T) -> Option<T> {
        self.slot.with_live(f)
    }
}
