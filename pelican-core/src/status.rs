/*
 * Read-only accessors for the reporting collaborator. Reads go through the
 * signal histories, never through the state machine's own fields, so a
 * reporting task can run concurrently with the control loop without seeing
 * a half-updated phase.
 */

use crate::history::SignalHistory;
use crate::trafficlight::SignalColor;

pub struct CrossingStatus<'a> {
    car_history: &'a SignalHistory,
    ped_history: &'a SignalHistory,
}

impl<'a> CrossingStatus<'a> {
    pub const fn new(car_history: &'a SignalHistory, ped_history: &'a SignalHistory) -> Self {
        CrossingStatus {
            car_history,
            ped_history,
        }
    }

    /// Most recently recorded car light color. Red until the control loop
    /// has recorded anything, since that is what the lamps show at rest.
    pub fn recent_car_state(&self) -> SignalColor {
        self.car_history.peek_last().unwrap_or(SignalColor::Red)
    }

    pub fn recent_pedestrian_state(&self) -> SignalColor {
        self.ped_history.peek_last().unwrap_or(SignalColor::Red)
    }
}
