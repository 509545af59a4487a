//! Device signal: viewport size and device tier
//!
//! This module is responsible for:
//! - Classifying a screen width into a coarse device tier
//! - Keeping the current [`DeviceSignal`] in sync with resize notifications
//!
//! The tier is a heuristic for how much seat-map complexity a screen can
//! take; it is not a user-agent check.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::DeviceBreakpoints;
use crate::domain::core::Size;
use crate::platform::signal::{ListenerGuard, ScreenSize, ViewportSignalSource};

/// Coarse viewport-size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceTier {
    /// Classifies a screen width
    ///
    /// Breakpoints are inclusive on their lower edge: with the default
    /// breakpoints, 768 is a tablet and 1024 is a desktop.
    pub fn classify(width: u32, breakpoints: &DeviceBreakpoints) -> Self {
        if width < breakpoints.tablet_min_width {
            DeviceTier::Mobile
        } else if width < breakpoints.desktop_min_width {
            DeviceTier::Tablet
        } else {
            DeviceTier::Desktop
        }
    }
}

/// Current viewport dimensions and their device tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceSignal {
    pub screen_width: u32,
    pub screen_height: u32,
    pub tier: DeviceTier,
}

impl DeviceSignal {
    /// Derives the signal for a screen size
    pub fn from_size(size: ScreenSize, breakpoints: &DeviceBreakpoints) -> Self {
        Self {
            screen_width: size.width,
            screen_height: size.height,
            tier: DeviceTier::classify(size.width, breakpoints),
        }
    }

    /// Screen dimensions as a layout size
    pub fn screen_size(&self) -> Size {
        Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }
}

/// Keeps a [`DeviceSignal`] current for as long as it lives
///
/// The signal is computed synchronously on construction and recomputed on
/// every resize notification. Dropping the provider removes its listener.
pub struct DeviceSignalProvider {
    signal: Rc<Cell<DeviceSignal>>,
    _listener: ListenerGuard,
}

impl DeviceSignalProvider {
    pub fn new(source: &Rc<dyn ViewportSignalSource>, breakpoints: DeviceBreakpoints) -> Self {
        let signal = Rc::new(Cell::new(DeviceSignal::from_size(source.size(), &breakpoints)));

        let target = Rc::clone(&signal);
        let listener = ListenerGuard::resize(
            source,
            Rc::new(move |size: ScreenSize| target.set(DeviceSignal::from_size(size, &breakpoints))),
        );

        Self {
            signal,
            _listener: listener,
        }
    }

    /// The most recent device signal
    pub fn current(&self) -> DeviceSignal {
        self.signal.get()
    }
}
