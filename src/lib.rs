#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod ambient;
mod cloud;
mod constants;
mod dom;
mod frame;
mod mount;
mod options;
mod render;

pub use ambient::AmbientFieldHandle;
pub use cloud::SpriteCloudHandle;

use constants::*;
use dom::AttributeSource;

/// Fields mounted from `data-decor` markup; kept alive until `unmount_all`.
enum AutoMounted {
    Cloud(SpriteCloudHandle),
    Ambient(AmbientFieldHandle),
}

thread_local! {
    static AUTO_MOUNTED: RefCell<Vec<AutoMounted>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("decor-web starting");

    let Some(document) = dom::window_document() else {
        log::warn!("no document; nothing to mount");
        return Ok(());
    };
    let mounted: Vec<AutoMounted> = dom::decor_hosts(&document)
        .into_iter()
        .filter_map(|(kind, host)| auto_mount(&kind, host))
        .collect();
    log::info!("auto-mounted {} field(s)", mounted.len());
    AUTO_MOUNTED.with(|m| m.borrow_mut().extend(mounted));
    Ok(())
}

fn auto_mount(kind: &str, host: web::HtmlElement) -> Option<AutoMounted> {
    match kind {
        DECOR_KIND_CLOUD => {
            let opts = options::cloud_options(&AttributeSource(&host));
            let handle = SpriteCloudHandle::new();
            handle.mount_with(host, opts);
            Some(AutoMounted::Cloud(handle))
        }
        DECOR_KIND_AMBIENT => {
            let opts = options::ambient_options(&AttributeSource(&host));
            let handle = AmbientFieldHandle::new();
            handle.mount_with(host, opts);
            Some(AutoMounted::Ambient(handle))
        }
        other => {
            log::warn!("unknown {DECOR_ATTR} kind {other:?}");
            None
        }
    }
}

/// Tear down every field mounted from markup. Returns how many were live
/// or still acquiring a device.
#[wasm_bindgen]
pub fn unmount_all() -> usize {
    let drained: Vec<AutoMounted> = AUTO_MOUNTED.with(|m| m.borrow_mut().drain(..).collect());
    drained
        .into_iter()
        .filter(|m| match m {
            AutoMounted::Cloud(h) => h.unmount(),
            AutoMounted::Ambient(h) => h.unmount(),
        })
        .count()
}
