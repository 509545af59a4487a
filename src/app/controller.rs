//! Viewport controller and coordination layer
//!
//! The controller wires the injected signal source and frame scheduler to
//! the feasibility estimator and the [`ViewportManager`]. It owns the only
//! mutable viewport state, diffs its inputs and re-adjusts when the
//! feasibility result, the viewport size or the device tier changes.
//!
//! Resize and fullscreen notifications are coalesced: the first one in a
//! frame schedules a refresh, later ones in the same frame are absorbed.
//! Dropping the controller removes its listeners and cancels a pending
//! refresh, so nothing is written after teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::app::state::{ViewMode, ViewportManager, ViewportState};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::core::Size;
use crate::domain::feasibility::{FeasibilityResult, available_space, compute_feasibility};
use crate::domain::seat_map::SeatMapDescription;
use crate::platform::device::{DeviceSignal, DeviceSignalProvider, DeviceTier};
use crate::platform::frame::{FrameHandle, FrameScheduler};
use crate::platform::signal::{ListenerGuard, ScreenSize, ViewportSignalSource};

/// Errors that can occur while setting up a controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Everything a consuming view reads, captured at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSnapshot {
    pub viewport: ViewportState,
    pub view_mode: ViewMode,
    pub viability: FeasibilityResult,
}

/// Inputs whose change requires a new adjustment
#[derive(Debug, Clone, PartialEq)]
struct ObservedInputs {
    feasibility: FeasibilityResult,
    viewport: Size,
    tier: DeviceTier,
}

struct ControllerCore {
    manager: ViewportManager,
    device: DeviceSignalProvider,
    config: EngineConfig,
    seat_map: Option<SeatMapDescription>,
    container: Option<Size>,
    observed: Option<ObservedInputs>,
    pending_frame: Option<FrameHandle>,
    adjust_count: u64,
}

impl ControllerCore {
    /// Re-evaluates feasibility and adjusts if any observed input changed
    fn refresh(&mut self) -> bool {
        let device = self.device.current();
        let feasibility =
            compute_feasibility(self.seat_map.as_ref(), &device, self.container, &self.config);
        let inputs = ObservedInputs {
            feasibility,
            viewport: available_space(&device, self.container, &self.config.layout),
            tier: device.tier,
        };

        if self.observed.as_ref() == Some(&inputs) {
            tracing::trace!("viewport inputs unchanged, skipping adjustment");
            return false;
        }

        self.manager.set_feasibility(inputs.feasibility.clone());
        self.manager.set_viewport_size(inputs.viewport);
        self.observed = Some(inputs);
        self.adjust();
        true
    }

    fn adjust(&mut self) {
        self.manager.adjust_viewport();
        self.adjust_count += 1;
    }
}

/// Main viewport controller
///
/// Single-threaded: all calls, notifications and frame callbacks happen on
/// the UI thread, so the shared core lives in a `RefCell`.
pub struct ViewportController {
    core: Rc<RefCell<ControllerCore>>,
    scheduler: Rc<dyn FrameScheduler>,
    _resize_listener: ListenerGuard,
    _fullscreen_listener: ListenerGuard,
}

impl ViewportController {
    /// Creates a controller and computes the initial viewport
    ///
    /// # Example
    /// ```rust
    /// use std::rc::Rc;
    /// use seatmap_viewport::app::{ViewMode, ViewportController};
    /// use seatmap_viewport::config::EngineConfig;
    /// use seatmap_viewport::domain::seat_map::{SeatMapDescription, SectionGeometry, Topology};
    /// use seatmap_viewport::platform::{FrameQueue, HeadlessSignalSource};
    ///
    /// let source = Rc::new(HeadlessSignalSource::new(1920, 1080));
    /// let frames = Rc::new(FrameQueue::new());
    /// let controller = ViewportController::new(source, frames, EngineConfig::default()).unwrap();
    ///
    /// controller.set_seat_map(Some(SeatMapDescription::new(
    ///     Topology::Cinema,
    ///     vec![SectionGeometry::new("A", 10, 15)],
    /// )));
    /// assert_eq!(controller.view_mode(), ViewMode::Full);
    /// assert_eq!(controller.viewport().scale, 1.0);
    /// ```
    pub fn new(
        source: Rc<dyn ViewportSignalSource>,
        scheduler: Rc<dyn FrameScheduler>,
        config: EngineConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;

        let device = DeviceSignalProvider::new(&source, config.breakpoints);
        let mut manager = ViewportManager::new(config.viewport.clone());
        manager.set_fullscreen(source.is_fullscreen());

        let core = Rc::new(RefCell::new(ControllerCore {
            manager,
            device,
            config,
            seat_map: None,
            container: None,
            observed: None,
            pending_frame: None,
            adjust_count: 0,
        }));
        core.borrow_mut().refresh();

        let resize_listener = {
            let core = Rc::downgrade(&core);
            let scheduler = Rc::clone(&scheduler);
            ListenerGuard::resize(
                &source,
                Rc::new(move |size: ScreenSize| {
                    tracing::trace!(width = size.width, height = size.height, "resize notification");
                    schedule_refresh(&core, &scheduler);
                }),
            )
        };

        let fullscreen_listener = {
            let core = Rc::downgrade(&core);
            let scheduler = Rc::clone(&scheduler);
            ListenerGuard::fullscreen(
                &source,
                Rc::new(move |fullscreen: bool| {
                    if let Some(strong) = core.upgrade() {
                        strong.borrow_mut().manager.set_fullscreen(fullscreen);
                    }
                    schedule_refresh(&core, &scheduler);
                }),
            )
        };

        Ok(Self {
            core,
            scheduler,
            _resize_listener: resize_listener,
            _fullscreen_listener: fullscreen_listener,
        })
    }

    /// Replaces the seat map and re-evaluates synchronously
    pub fn set_seat_map(&self, seat_map: Option<SeatMapDescription>) {
        let mut core = self.core.borrow_mut();
        core.seat_map = seat_map;
        core.refresh();
    }

    /// Sets or clears an explicit container size and re-evaluates synchronously
    pub fn set_container_size(&self, container: Option<Size>) {
        let mut core = self.core.borrow_mut();
        core.container = container;
        core.refresh();
    }

    /// Current viewport state
    pub fn viewport(&self) -> ViewportState {
        *self.core.borrow().manager.state()
    }

    /// View mode in effect
    pub fn view_mode(&self) -> ViewMode {
        self.core.borrow().manager.view_mode()
    }

    /// Latest feasibility result
    pub fn viability(&self) -> FeasibilityResult {
        self.core.borrow().manager.feasibility().clone()
    }

    /// Current device signal
    pub fn device(&self) -> DeviceSignal {
        self.core.borrow().device.current()
    }

    /// Viewport, view mode and feasibility read together
    pub fn snapshot(&self) -> ViewportSnapshot {
        let core = self.core.borrow();
        ViewportSnapshot {
            viewport: *core.manager.state(),
            view_mode: core.manager.view_mode(),
            viability: core.manager.feasibility().clone(),
        }
    }

    pub fn set_scale(&self, scale: f64) {
        self.core.borrow_mut().manager.set_scale(scale);
    }

    pub fn set_pan(&self, x: f64, y: f64) {
        self.core.borrow_mut().manager.set_pan(x, y);
    }

    /// Pins a view mode, or returns to the recommendation with `Auto`
    pub fn set_view_mode(&self, mode: ViewMode) {
        let mut core = self.core.borrow_mut();
        core.manager.set_view_mode(mode);
        core.adjust_count += 1;
    }

    pub fn fit_to_screen(&self) {
        self.core.borrow_mut().manager.fit_to_screen();
    }

    pub fn center_content(&self) {
        self.core.borrow_mut().manager.center_content();
    }

    /// Re-runs the adjustment from the current inputs
    pub fn adjust_viewport(&self) {
        self.core.borrow_mut().adjust();
    }

    /// Discards manual scale and pan; a pinned mode stays pinned
    pub fn reset_viewport(&self) {
        let mut core = self.core.borrow_mut();
        core.manager.reset_viewport();
        core.adjust_count += 1;
    }

    /// Number of adjustments performed so far
    pub fn adjust_count(&self) -> u64 {
        self.core.borrow().adjust_count
    }

    /// Returns true while a coalesced refresh waits for the next frame
    pub fn has_pending_frame(&self) -> bool {
        self.core.borrow().pending_frame.is_some()
    }
}

impl Drop for ViewportController {
    fn drop(&mut self) {
        let pending = self.core.borrow_mut().pending_frame.take();
        if let Some(handle) = pending {
            tracing::trace!(?handle, "cancelling pending viewport refresh");
            self.scheduler.cancel_frame(handle);
        }
        // Listener guards deregister when the fields drop
    }
}

/// Schedules one refresh for the next frame unless one is already pending
///
/// The frame callback only holds a weak reference, so a controller that is
/// gone by then is left alone.
fn schedule_refresh(core: &Weak<RefCell<ControllerCore>>, scheduler: &Rc<dyn FrameScheduler>) {
    let Some(strong) = core.upgrade() else {
        return;
    };
    if strong.borrow().pending_frame.is_some() {
        tracing::trace!("coalescing into pending frame");
        return;
    }

    let target = Weak::clone(core);
    let fired = Rc::new(Cell::new(false));
    let ran = Rc::clone(&fired);
    let handle = scheduler.request_frame(Box::new(move || {
        ran.set(true);
        if let Some(core) = target.upgrade() {
            let mut core = core.borrow_mut();
            core.pending_frame = None;
            core.refresh();
        }
    }));
    // a scheduler that ran the callback inline leaves nothing pending
    if !fired.get() {
        strong.borrow_mut().pending_frame = Some(handle);
    }
}
