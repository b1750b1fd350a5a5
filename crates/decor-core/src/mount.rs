//! Mount slot: idle, waiting on a device, or live.
//!
//! Device acquisition is asynchronous on the web, so the slot never awaits
//! anything itself. `begin` hands out a ticket and the host later calls
//! `complete` with whatever the acquisition produced. A ticket that was
//! cancelled in the meantime only gets its device destroyed; the field is
//! never started for it.

use crate::config::{DeviceClass, ResponsivePolicy};
use crate::error::{FieldError, FieldResult};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// A rendering context owned by exactly one mount.
pub trait MountDevice {
    fn destroy(&self);
}

/// A started field the slot can poll and tear down.
pub trait LiveMount {
    fn is_running(&self) -> bool;

    fn stop(self);
}

/// Handed out by `MountSlot::begin`; redeemed once by `complete`.
#[derive(Debug)]
pub struct AcquireTicket {
    cancelled: Rc<Cell<bool>>,
}

impl AcquireTicket {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MountOutcome {
    Live,
    /// Unmounted or superseded while the device was in flight.
    Cancelled,
    /// Acquisition or start failed; the host shows its fallback.
    Failed(FieldError),
}

enum SlotState<D, L> {
    Idle,
    Acquiring(Rc<Cell<bool>>),
    Live { device: Rc<D>, live: L },
}

/// One mount point. Cloning shares the slot.
pub struct MountSlot<D, L> {
    state: Rc<RefCell<SlotState<D, L>>>,
}

/// Non-owning reference to a slot, for callbacks owned by the live field.
pub struct WeakMountSlot<D, L> {
    state: Weak<RefCell<SlotState<D, L>>>,
}

impl<D, L> Clone for MountSlot<D, L> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<D, L> Default for MountSlot<D, L> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(SlotState::Idle)),
        }
    }
}

impl<D, L> WeakMountSlot<D, L> {
    pub fn upgrade(&self) -> Option<MountSlot<D, L>> {
        self.state.upgrade().map(|state| MountSlot { state })
    }
}

impl<D: MountDevice, L: LiveMount> MountSlot<D, L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakMountSlot<D, L> {
        WeakMountSlot {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Stop any previous mount and wait for a device.
    pub fn begin(&self) -> AcquireTicket {
        self.stop();
        let cancelled = Rc::new(Cell::new(false));
        *self.state.borrow_mut() = SlotState::Acquiring(cancelled.clone());
        AcquireTicket { cancelled }
    }

    /// Finish a mount once acquisition settled.
    ///
    /// `start` only runs for a ticket that is still current. Every device
    /// that does not end up owned by a live mount is destroyed here.
    pub fn complete<S>(
        &self,
        ticket: AcquireTicket,
        acquired: FieldResult<D>,
        start: S,
    ) -> MountOutcome
    where
        S: FnOnce(Rc<D>) -> FieldResult<L>,
    {
        if ticket.is_cancelled() {
            if let Ok(device) = acquired {
                device.destroy();
            }
            return MountOutcome::Cancelled;
        }
        let device = match acquired {
            Ok(device) => Rc::new(device),
            Err(e) => {
                *self.state.borrow_mut() = SlotState::Idle;
                return MountOutcome::Failed(e);
            }
        };
        match start(device.clone()) {
            Ok(live) if ticket.is_cancelled() => {
                live.stop();
                device.destroy();
                MountOutcome::Cancelled
            }
            Ok(live) => {
                *self.state.borrow_mut() = SlotState::Live { device, live };
                MountOutcome::Live
            }
            Err(e) => {
                device.destroy();
                *self.state.borrow_mut() = SlotState::Idle;
                MountOutcome::Failed(e)
            }
        }
    }

    /// Stop whatever is running or pending. Returns whether anything was.
    pub fn stop(&self) -> bool {
        let prev = std::mem::replace(&mut *self.state.borrow_mut(), SlotState::Idle);
        match prev {
            SlotState::Idle => false,
            SlotState::Acquiring(cancelled) => {
                cancelled.set(true);
                true
            }
            SlotState::Live { device, live } => {
                live.stop();
                device.destroy();
                true
            }
        }
    }

    /// Tear down a live mount whose loop already stopped on its own.
    pub fn reap_stopped(&self) -> bool {
        let stopped = matches!(
            &*self.state.borrow(),
            SlotState::Live { live, .. } if !live.is_running()
        );
        stopped && self.stop()
    }

    pub fn is_idle(&self) -> bool {
        matches!(&*self.state.borrow(), SlotState::Idle)
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(&*self.state.borrow(), SlotState::Acquiring(_))
    }

    pub fn is_running(&self) -> bool {
        match &*self.state.borrow() {
            SlotState::Live { live, .. } => live.is_running(),
            _ => false,
        }
    }

    /// Run `f` against the live mount, if there is one.
    pub fn with_live<T>(&self, f: impl FnOnce(&Rc<D>, &L) -> T) -> Option<T> {
        match &*self.state.borrow() {
            SlotState::Live { device, live } => Some(f(device, live)),
            _ => None,
        }
    }
}

/// Device class a live field was built for.
///
/// A resize only rebuilds when it crosses into the other class.
#[derive(Debug)]
pub struct ClassWatch {
    policy: ResponsivePolicy,
    current: Cell<Option<DeviceClass>>,
}

impl ClassWatch {
    pub fn new(policy: ResponsivePolicy) -> Self {
        Self {
            policy,
            current: Cell::new(None),
        }
    }

    pub fn policy(&self) -> &ResponsivePolicy {
        &self.policy
    }

    pub fn current(&self) -> Option<DeviceClass> {
        self.current.get()
    }

    pub fn settle(&self, class: DeviceClass) {
        self.current.set(Some(class));
    }

    pub fn clear(&self) {
        self.current.set(None);
    }

    /// Call `rebuild` with the new class if the resize changed it.
    ///
    /// Returns `None` when nothing was rebuilt. A failed rebuild clears the
    /// watch so later resizes leave the field alone.
    pub fn resize<F>(
        &self,
        viewport_width_css: f32,
        low_power: bool,
        rebuild: F,
    ) -> Option<FieldResult<DeviceClass>>
    where
        F: FnOnce(DeviceClass) -> FieldResult<()>,
    {
        let current = self.current.get()?;
        let next = self.policy.classify(viewport_width_css, low_power);
        if next == current {
            return None;
        }
        Some(match rebuild(next) {
            Ok(()) => {
                self.settle(next);
                Ok(next)
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        })
    }
}
