// Mount / tick / unmount against a counting scheduler and renderer.

use decor_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Default)]
struct Ledger {
    pending: BTreeSet<u32>,
    next_handle: u32,
    requests: u32,
    cancels: u32,
    live_renderers: i32,
    built: u32,
    released: u32,
    renders: u32,
    last_nodes: usize,
    fail_schedule: bool,
    fail_render: Option<FieldError>,
}

type Shared = Rc<RefCell<Ledger>>;

struct CountingScheduler(Shared);

impl FrameScheduler for CountingScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> FieldResult<u32> {
        let mut l = self.0.borrow_mut();
        if l.fail_schedule {
            return Err(FieldError::Scheduler("refused".into()));
        }
        l.next_handle += 1;
        let h = l.next_handle;
        l.pending.insert(h);
        l.requests += 1;
        Ok(h)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut l = self.0.borrow_mut();
        l.pending.remove(&handle);
        l.cancels += 1;
    }
}

struct CountingRenderer {
    ledger: Shared,
}

impl FieldRenderer<SpriteCloudFrame> for CountingRenderer {
    fn render(&mut self, frame: &SpriteCloudFrame) -> FieldResult<()> {
        let mut l = self.ledger.borrow_mut();
        if let Some(e) = l.fail_render.clone() {
            return Err(e);
        }
        l.renders += 1;
        l.last_nodes = frame.nodes.len();
        Ok(())
    }

    fn release(&mut self) {
        let mut l = self.ledger.borrow_mut();
        l.live_renderers -= 1;
        l.released += 1;
    }
}

type Loop = RenderLoop<SpriteCloud, CountingScheduler, CountingRenderer>;

fn cloud(count: usize) -> SpriteCloud {
    SpriteCloud::new(
        FieldConfig::sprite_cloud(count, 1.0, 0.12),
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap()
}

fn new_loop(count: usize) -> (Loop, Shared) {
    let ledger: Shared = Rc::default();
    let lp = RenderLoop::new(cloud(count), CountingScheduler(ledger.clone()));
    (lp, ledger)
}

fn builder(ledger: &Shared) -> impl FnOnce(&SpriteCloud) -> FieldResult<CountingRenderer> {
    let ledger = ledger.clone();
    move |_field| {
        {
            let mut l = ledger.borrow_mut();
            l.live_renderers += 1;
            l.built += 1;
        }
        Ok(CountingRenderer { ledger })
    }
}

/// Fire the callback the host would run for the pending handle.
fn fire(lp: &mut Loop, ledger: &Shared, now: f64) -> FieldResult<()> {
    if let Some(h) = lp.pending_frame() {
        ledger.borrow_mut().pending.remove(&h);
    }
    lp.tick(now)
}

#[test]
fn mount_schedules_exactly_one_frame() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    assert!(lp.is_mounted());
    assert_eq!(ledger.borrow().pending.len(), 1);
    assert_eq!(ledger.borrow().live_renderers, 1);
}

#[test]
fn each_tick_renders_once_and_keeps_one_pending() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 10.0).unwrap();
    for i in 1..=30 {
        fire(&mut lp, &ledger, 10.0 + i as f64 / 60.0).unwrap();
        let l = ledger.borrow();
        assert_eq!(l.pending.len(), 1);
        assert_eq!(l.renders, i);
        assert_eq!(l.last_nodes, 12);
    }
    assert_eq!(lp.frames_rendered(), 30);
}

#[test]
fn repeated_mount_unmount_leaks_nothing() {
    let (mut lp, ledger) = new_loop(12);
    for cycle in 0..50 {
        lp.mount(builder(&ledger), cycle as f64).unwrap();
        for f in 0..(cycle % 4) {
            fire(&mut lp, &ledger, cycle as f64 + f as f64 * 0.016).unwrap();
        }
        assert!(lp.unmount());
        let l = ledger.borrow();
        assert!(l.pending.is_empty(), "cycle {cycle}");
        assert_eq!(l.live_renderers, 0, "cycle {cycle}");
    }
    let l = ledger.borrow();
    assert_eq!(l.built, 50);
    assert_eq!(l.released, 50);
}

#[test]
fn mounting_twice_releases_the_first_mount() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    lp.mount(builder(&ledger), 1.0).unwrap();
    let l = ledger.borrow();
    assert_eq!(l.live_renderers, 1);
    assert_eq!(l.pending.len(), 1);
    assert_eq!(l.released, 1);
}

#[test]
fn unmount_is_idempotent() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    assert!(lp.unmount());
    assert!(!lp.unmount());
    assert!(!lp.unmount());
    assert_eq!(ledger.borrow().released, 1);
    assert_eq!(ledger.borrow().cancels, 1);
}

#[test]
fn unmount_without_mount_is_a_no_op() {
    let (mut lp, ledger) = new_loop(12);
    assert!(!lp.unmount());
    let l = ledger.borrow();
    assert_eq!(l.released, 0);
    assert_eq!(l.cancels, 0);
}

#[test]
fn tick_after_unmount_does_nothing() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    lp.unmount();
    lp.tick(5.0).unwrap();
    let l = ledger.borrow();
    assert_eq!(l.renders, 0);
    assert!(l.pending.is_empty());
    assert_eq!(l.requests, 1);
}

#[test]
fn build_failure_leaves_loop_unmounted() {
    let (mut lp, ledger) = new_loop(12);
    let err = lp
        .mount(
            |_: &SpriteCloud| -> FieldResult<CountingRenderer> {
                Err(FieldError::SurfaceUnavailable("no webgpu".into()))
            },
            0.0,
        )
        .unwrap_err();
    assert!(matches!(err, FieldError::SurfaceUnavailable(_)));
    assert!(!lp.is_mounted());
    assert!(ledger.borrow().pending.is_empty());
}

#[test]
fn schedule_failure_on_mount_releases_renderer() {
    let (mut lp, ledger) = new_loop(12);
    ledger.borrow_mut().fail_schedule = true;
    assert!(lp.mount(builder(&ledger), 0.0).is_err());
    assert!(!lp.is_mounted());
    let l = ledger.borrow();
    assert_eq!(l.built, 1);
    assert_eq!(l.live_renderers, 0);
}

#[test]
fn lost_surface_stops_the_loop() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    ledger.borrow_mut().fail_render = Some(FieldError::SurfaceLost);
    assert_eq!(fire(&mut lp, &ledger, 0.5), Err(FieldError::SurfaceLost));
    assert!(!lp.is_mounted());
    let l = ledger.borrow();
    assert!(l.pending.is_empty());
    assert_eq!(l.live_renderers, 0);
}

#[test]
fn transient_render_error_keeps_running() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    ledger.borrow_mut().fail_render = Some(FieldError::Scheduler("hiccup".into()));
    fire(&mut lp, &ledger, 0.1).unwrap();
    assert!(lp.is_mounted());
    assert_eq!(ledger.borrow().pending.len(), 1);
    ledger.borrow_mut().fail_render = None;
    fire(&mut lp, &ledger, 0.2).unwrap();
    assert_eq!(ledger.borrow().renders, 1);
}

#[test]
fn reconfigure_swaps_the_field_and_remounts() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    fire(&mut lp, &ledger, 0.1).unwrap();
    lp.reconfigure(cloud(5), builder(&ledger), 1.0).unwrap();
    assert_eq!(lp.field().element_count(), 5);
    assert_eq!(lp.frames_rendered(), 0);
    fire(&mut lp, &ledger, 1.1).unwrap();
    let l = ledger.borrow();
    assert_eq!(l.live_renderers, 1);
    assert_eq!(l.pending.len(), 1);
    assert_eq!(l.released, 1);
}

#[test]
fn dropping_a_mounted_loop_releases_everything() {
    let (mut lp, ledger) = new_loop(12);
    lp.mount(builder(&ledger), 0.0).unwrap();
    drop(lp);
    let l = ledger.borrow();
    assert!(l.pending.is_empty());
    assert_eq!(l.live_renderers, 0);
}

#[test]
fn empty_field_still_runs_the_loop() {
    let (mut lp, ledger) = new_loop(0);
    lp.mount(builder(&ledger), 0.0).unwrap();
    fire(&mut lp, &ledger, 0.1).unwrap();
    assert_eq!(ledger.borrow().renders, 1);
    assert!(lp.unmount());
}

#[test]
fn clock_ignores_timestamps_before_mount() {
    let clock = AnimationClock::starting_at(100.0);
    assert_eq!(clock.elapsed(99.0), 0.0);
    assert_eq!(clock.elapsed(100.0), 0.0);
    assert!((clock.elapsed(102.5) - 2.5).abs() < 1e-6);
}
