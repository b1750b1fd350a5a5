use crate::dom::{self, JsOptions};
use crate::frame::LiveField;
use crate::mount::FieldSlot;
use crate::options::{cloud_options, CloudOptions};
use crate::render::SpriteCloudRenderer;
use decor_core::{FieldConfig, SpriteCloud};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// A small sprite cloud mounted into a host element.
#[wasm_bindgen]
pub struct SpriteCloudHandle {
    slot: FieldSlot<SpriteCloud, SpriteCloudRenderer>,
}

impl Default for SpriteCloudHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SpriteCloudHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            slot: FieldSlot::new(),
        }
    }

    /// Mount into `host`. `options` may be `undefined` or an object with
    /// `width`, `height`, `density`, `baseScale` and `speed`; anything missing
    /// comes from the host's `data-*` attributes, then from defaults.
    pub fn mount(&self, host: web::HtmlElement, options: JsValue) {
        let opts = cloud_options(&JsOptions {
            object: &options,
            host: &host,
        });
        self.mount_with(host, opts);
    }

    /// Stop animating and remove the canvas. Safe to call repeatedly.
    pub fn unmount(&self) -> bool {
        self.slot.stop()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.slot.is_running()
    }
}

impl SpriteCloudHandle {
    pub(crate) fn mount_with(&self, host: web::HtmlElement, opts: CloudOptions) {
        log::info!(
            "[cloud] mounting density={} scale={} speed={}",
            opts.density,
            opts.base_scale,
            opts.speed
        );
        let config = FieldConfig::sprite_cloud(opts.density, opts.base_scale, opts.speed);
        let cloud = match SpriteCloud::new(config, &mut StdRng::from_entropy()) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[cloud] {e}");
                dom::mark_fallback(&host);
                return;
            }
        };
        let size_css = (opts.width_css, opts.height_css);
        let target = host.clone();
        self.slot.begin(host, "cloud", move |gpu| {
            LiveField::start(cloud, |c| {
                SpriteCloudRenderer::new(gpu, &target, size_css, c)
            })
        });
    }
}

impl Drop for SpriteCloudHandle {
    fn drop(&mut self) {
        self.slot.stop();
    }
}
