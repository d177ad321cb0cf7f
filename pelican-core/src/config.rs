/*
 * Deployment configuration for the crossing. The durations here are policy,
 * not logic: the state machines take them as parameters so that tests can
 * run the same code on a compressed schedule.
 */

use embassy_time::Duration;

/// Slots in the channel between the debouncer and the control loop. Presses
/// beyond this while the control loop is busy are dropped, not queued.
pub const EVENT_CHANNEL_CAPACITY: usize = 8;

/// Samples retained per signal history ring.
pub const HISTORY_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub car_green: Duration,
    pub car_yellow: Duration,
    pub car_red: Duration,
    pub pedestrian_green: Duration,
    /// How long cars keep their green after a pedestrian requests a crossing.
    pub pedestrian_grace: Duration,
    /// Quiet interval between a button edge and the confirming re-sample.
    pub debounce: Duration,
}

impl Timings {
    pub const DEFAULT: Timings = Timings {
        car_green: Duration::from_millis(5000),
        car_yellow: Duration::from_millis(1000),
        car_red: Duration::from_millis(3000),
        pedestrian_green: Duration::from_millis(5000),
        pedestrian_grace: Duration::from_millis(500),
        debounce: Duration::from_millis(50),
    };
}

impl Default for Timings {
    fn default() -> Self {
        Timings::DEFAULT
    }
}
