//! Injected environment: viewport signals, frame scheduling, device tier
//!
//! This module isolates everything that would otherwise reach for a real
//! window. Hosts plug their display surface in through the traits here, so
//! the estimator and state manager stay testable without one.

pub mod device;
pub mod frame;
pub mod signal;

pub use device::{DeviceSignal, DeviceSignalProvider, DeviceTier};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use signal::{HeadlessSignalSource, ListenerGuard, ScreenSize, ViewportSignalSource};
