/*
 * The traffic light state machine, without any timing or I/O.
 *
 * Four phases cycle CarGreen -> CarYellow -> CarRed -> CarGreen until a
 * pedestrian requests a crossing, which routes the CarRed exit through
 * PedestrianGreen instead. The lamp colors are derived from the phase by
 * exhaustive matches, so a state that shows green to cars and pedestrians
 * at the same time cannot be expressed at all.
 */

use embassy_time::Duration;

use crate::config::Timings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CarGreen,
    CarYellow,
    CarRed,
    PedestrianGreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightId {
    Car,
    Pedestrian,
}

/// The boundary to the lamp driver hardware: the core asserts colors,
/// failures are the implementor's concern.
pub trait SignalOutput {
    fn set_signal(&mut self, light: LightId, color: SignalColor);
}

#[derive(Debug)]
pub struct TrafficLight {
    phase: Phase,
    pedestrian_waiting: bool,
}

impl TrafficLight {
    pub const fn new() -> Self {
        TrafficLight {
            phase: Phase::CarGreen,
            pedestrian_waiting: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pedestrian_waiting(&self) -> bool {
        self.pedestrian_waiting
    }

    /// Latches a pedestrian crossing request. Idempotent: repeated presses
    /// before the crossing is served coalesce into the same pending request.
    pub fn request_crossing(&mut self) {
        self.pedestrian_waiting = true;
    }

    /// True in the phases whose wait may be shortened by a pending request.
    /// Yellow and the crossing itself always run their full time.
    pub fn preemptible(&self) -> bool {
        match self.phase {
            Phase::CarGreen | Phase::CarRed => true,
            Phase::CarYellow | Phase::PedestrianGreen => false,
        }
    }

    pub fn car_color(&self) -> SignalColor {
        match self.phase {
            Phase::CarGreen => SignalColor::Green,
            Phase::CarYellow => SignalColor::Yellow,
            Phase::CarRed | Phase::PedestrianGreen => SignalColor::Red,
        }
    }

    pub fn ped_color(&self) -> SignalColor {
        match self.phase {
            Phase::PedestrianGreen => SignalColor::Green,
            Phase::CarGreen | Phase::CarYellow | Phase::CarRed => SignalColor::Red,
        }
    }

    /*
     * Determine the next phase, without changing the phase that we are in.
     */
    fn next_phase(&self) -> Phase {
        match (&self.phase, self.pedestrian_waiting) {
            (Phase::CarGreen, _) => Phase::CarYellow,
            (Phase::CarYellow, _) => Phase::CarRed,
            (Phase::CarRed, true) => Phase::PedestrianGreen,
            (Phase::CarRed, false) => Phase::CarGreen,
            (Phase::PedestrianGreen, _) => Phase::CarGreen,
        }
    }

    /// Advances to the next phase. Completing a crossing clears the pending
    /// request; nothing else does.
    pub fn to_next_phase(&mut self) {
        let next_phase = self.next_phase();
        if let Phase::PedestrianGreen = self.phase {
            self.pedestrian_waiting = false;
        }
        self.phase = next_phase;
    }

    pub fn phase_time(&self, timings: &Timings) -> Duration {
        match self.phase {
            Phase::CarGreen => timings.car_green,
            Phase::CarYellow => timings.car_yellow,
            Phase::CarRed => timings.car_red,
            Phase::PedestrianGreen => timings.pedestrian_green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 4] = [
        Phase::CarGreen,
        Phase::CarYellow,
        Phase::CarRed,
        Phase::PedestrianGreen,
    ];

    fn light_in(phase: Phase) -> TrafficLight {
        let mut light = TrafficLight::new();
        while light.phase() != phase {
            // PedestrianGreen is only reachable with a latched request.
            if light.phase() == Phase::CarRed && phase == Phase::PedestrianGreen {
                light.request_crossing();
            }
            light.to_next_phase();
        }
        light
    }

    #[test]
    fn free_run_cycle_skips_the_crossing() {
        let mut light = TrafficLight::new();
        assert_eq!(light.phase(), Phase::CarGreen);
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::CarYellow);
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::CarRed);
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::CarGreen);
    }

    #[test]
    fn pending_request_routes_red_into_the_crossing() {
        let mut light = TrafficLight::new();
        light.request_crossing();
        light.to_next_phase(); // yellow
        light.to_next_phase(); // red
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::PedestrianGreen);
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::CarGreen);
    }

    #[test]
    fn completing_the_crossing_clears_the_request() {
        let mut light = light_in(Phase::PedestrianGreen);
        assert!(light.pedestrian_waiting());
        light.to_next_phase();
        assert!(!light.pedestrian_waiting());
        assert_eq!(light.phase(), Phase::CarGreen);
    }

    #[test]
    fn request_latches_across_yellow() {
        let mut light = TrafficLight::new();
        light.to_next_phase(); // yellow, request arrives now
        light.request_crossing();
        light.to_next_phase(); // red
        assert!(light.pedestrian_waiting());
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::PedestrianGreen);
    }

    #[test]
    fn repeated_requests_grant_one_crossing() {
        let mut light = TrafficLight::new();
        light.request_crossing();
        light.request_crossing();
        light.request_crossing();
        light.to_next_phase(); // yellow
        light.to_next_phase(); // red
        light.to_next_phase(); // crossing
        light.to_next_phase(); // back to green, request cleared
        light.to_next_phase(); // yellow
        light.to_next_phase(); // red
        light.to_next_phase();
        assert_eq!(light.phase(), Phase::CarGreen);
    }

    #[test]
    fn cars_and_pedestrians_never_share_green() {
        for phase in ALL_PHASES {
            let mut light = light_in(phase);
            for _ in 0..2 {
                let both_green = light.car_color() == SignalColor::Green
                    && light.ped_color() == SignalColor::Green;
                assert!(!both_green, "both lights green in {:?}", phase);
                // A request arriving in this phase must not change the lamps.
                light.request_crossing();
            }
        }
    }

    #[test]
    fn only_green_and_red_phases_are_preemptible() {
        assert!(light_in(Phase::CarGreen).preemptible());
        assert!(light_in(Phase::CarRed).preemptible());
        assert!(!light_in(Phase::CarYellow).preemptible());
        assert!(!light_in(Phase::PedestrianGreen).preemptible());
    }

    #[test]
    fn phase_times_come_from_the_timings_table() {
        let timings = Timings::DEFAULT;
        assert_eq!(
            light_in(Phase::CarGreen).phase_time(&timings),
            timings.car_green
        );
        assert_eq!(
            light_in(Phase::PedestrianGreen).phase_time(&timings),
            timings.pedestrian_green
        );
    }
}
