use crate::dom::{self, JsOptions};
use crate::frame::LiveField;
use crate::mount::FieldSlot;
use crate::options::{ambient_options, AmbientOptions};
use crate::render::{AmbientRenderer, GpuDevice};
use decor_core::{
    AmbientConfig, AmbientField, ClassWatch, DeviceClass, FieldResult, ResponsivePolicy,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type AmbientSlot = FieldSlot<AmbientField, AmbientRenderer>;
type ResizeListener = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Full-bleed ambient backdrop: particle sphere, grid plane and starfield.
///
/// Density follows the window: crossing the breakpoint rebuilds the field
/// with the other profile.
#[wasm_bindgen]
pub struct AmbientFieldHandle {
    slot: AmbientSlot,
    on_resize: ResizeListener,
}

impl Default for AmbientFieldHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AmbientFieldHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            slot: FieldSlot::new(),
            on_resize: Rc::new(RefCell::new(None)),
        }
    }

    /// Mount into `host`. `options` may carry `lowPower` and `breakpoint`.
    pub fn mount(&self, host: web::HtmlElement, options: JsValue) {
        let opts = ambient_options(&JsOptions {
            object: &options,
            host: &host,
        });
        self.mount_with(host, opts);
    }

    pub fn unmount(&self) -> bool {
        remove_resize_listener(&self.on_resize);
        self.slot.stop()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.slot.is_running()
    }
}

fn policy_for(opts: &AmbientOptions) -> ResponsivePolicy {
    ResponsivePolicy {
        breakpoint_px: opts.breakpoint_px,
        ..ResponsivePolicy::default()
    }
}

fn low_power(opts: &AmbientOptions) -> bool {
    opts.low_power || dom::hardware_is_low_power()
}

/// Build a fresh field with the profile of `class`.
fn build_field(policy: &ResponsivePolicy, class: DeviceClass) -> FieldResult<AmbientField> {
    let config = AmbientConfig::new(policy.profile(class));
    log::info!(
        "[ambient] {:?} profile: particles={} stars={}",
        class,
        config.profile.particles,
        config.profile.stars
    );
    AmbientField::new(config, &mut StdRng::from_entropy())
}

impl AmbientFieldHandle {
    pub(crate) fn mount_with(&self, host: web::HtmlElement, opts: AmbientOptions) {
        self.unmount();
        let watch = Rc::new(ClassWatch::new(policy_for(&opts)));
        let slot = self.slot.clone();
        let listener = self.on_resize.clone();
        let target = host.clone();
        self.slot.begin(host, "ambient", move |gpu| {
            let class = watch
                .policy()
                .classify(dom::viewport_width_css(), low_power(&opts));
            let field = build_field(watch.policy(), class)?;
            let live = LiveField::start(field, |f| AmbientRenderer::new(gpu, &target, f))?;
            watch.settle(class);
            install_resize_listener(&listener, slot, watch, target, opts);
            Ok(live)
        });
    }
}

fn install_resize_listener(
    listener: &ResizeListener,
    slot: AmbientSlot,
    watch: Rc<ClassWatch>,
    host: web::HtmlElement,
    opts: AmbientOptions,
) {
    let Some(window) = web::window() else {
        return;
    };
    remove_resize_listener(listener);
    let on_resize = Closure::wrap(Box::new(move || {
        on_window_resize(&slot, &watch, &host, &opts);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    *listener.borrow_mut() = Some(on_resize);
}

fn remove_resize_listener(listener: &ResizeListener) {
    if let Some(cb) = listener.borrow_mut().take() {
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
    }
}

fn on_window_resize(
    slot: &AmbientSlot,
    watch: &ClassWatch,
    host: &web::HtmlElement,
    opts: &AmbientOptions,
) {
    if let Some(canvas) = dom::host_canvas(host) {
        dom::sync_canvas_backing_size(&canvas);
    }
    let outcome = watch.resize(dom::viewport_width_css(), low_power(opts), |next| {
        log::info!("[ambient] device class -> {:?}", next);
        slot.with_live(|gpu, live| rebuild(gpu, live, host, watch.policy(), next))
            .unwrap_or(Ok(()))
    });
    if let Some(Err(e)) = outcome {
        log::warn!("[ambient] rebuild failed: {e}");
        dom::mark_fallback(host);
    }
}

fn rebuild(
    gpu: &Rc<GpuDevice>,
    live: &LiveField<AmbientField, AmbientRenderer>,
    host: &web::HtmlElement,
    policy: &ResponsivePolicy,
    class: DeviceClass,
) -> FieldResult<()> {
    let field = build_field(policy, class)?;
    live.reconfigure(field, |f| AmbientRenderer::new(gpu.clone(), host, f))
}

impl Drop for AmbientFieldHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
