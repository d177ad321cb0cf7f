/*
 * The hardware-independent core of the pelican crossing controller.
 *
 * This crate holds the state machines and the plumbing between them: the
 * button debouncer, the traffic light phase logic, the event channel that
 * connects the two, and the signal history ring buffers that back the status
 * reporting. Hardware is reached exclusively through the narrow traits
 * `SignalOutput` and `ButtonInput`, so the whole crate runs (and is tested)
 * on the host.
 */
#![no_std]

#[cfg(test)]
extern crate std;

pub mod button;
pub mod config;
pub mod controller;
pub mod events;
pub mod history;
pub mod status;
pub mod trafficlight;

pub use button::{ButtonInput, ButtonState, Debouncer};
pub use config::Timings;
pub use controller::CrossingController;
pub use events::{Event, EventChannel, EventReceiver, EventSender};
pub use history::{RingHistory, SignalHistory};
pub use status::CrossingStatus;
pub use trafficlight::{LightId, Phase, SignalColor, SignalOutput, TrafficLight};
