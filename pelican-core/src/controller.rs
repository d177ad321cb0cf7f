/*
 * The control loop that drives the crossing.
 *
 * Each step serves exactly one phase: drain pending events, assert the
 * lamps, record the colors, wait out the phase, advance. The waits in
 * CarGreen and CarRed double as bounded receives on the event channel, so a
 * press arriving mid-phase is seen immediately instead of at the next phase
 * boundary. CarYellow and PedestrianGreen run their full duration no matter
 * what: a yellow warning is never cut short and neither is a pedestrian
 * already on the crossing. Presses arriving during those phases stay queued
 * and are drained at the next step.
 */

use embassy_time::Timer;
use log::info;

use crate::config::Timings;
use crate::events::{Event, EventReceiver, receive_with_timeout};
use crate::history::SignalHistory;
use crate::trafficlight::{LightId, Phase, SignalColor, SignalOutput, TrafficLight};

pub struct CrossingController<'a, O: SignalOutput> {
    light: TrafficLight,
    events: EventReceiver<'a>,
    output: O,
    car_history: &'a SignalHistory,
    ped_history: &'a SignalHistory,
    timings: Timings,
}

impl<'a, O: SignalOutput> CrossingController<'a, O> {
    pub fn new(
        events: EventReceiver<'a>,
        output: O,
        car_history: &'a SignalHistory,
        ped_history: &'a SignalHistory,
        timings: Timings,
    ) -> Self {
        CrossingController {
            light: TrafficLight::new(),
            events,
            output,
            car_history,
            ped_history,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.light.phase()
    }

    pub fn pedestrian_waiting(&self) -> bool {
        self.light.pedestrian_waiting()
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::ButtonPress => {
                if !self.light.pedestrian_waiting() {
                    info!("pedestrian button pressed");
                }
                self.light.request_crossing();
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_receive() {
            self.on_event(event);
        }
    }

    /// Phase entry action: drive both lamps and record both colors.
    fn assert_signals(&mut self) {
        let car = self.light.car_color();
        let ped = self.light.ped_color();
        self.output.set_signal(LightId::Car, car);
        self.output.set_signal(LightId::Pedestrian, ped);
        self.car_history.push(car);
        self.ped_history.push(ped);
    }

    async fn wait_out_phase(&mut self) {
        let nominal = self.light.phase_time(&self.timings);

        if !self.light.preemptible() {
            Timer::after(nominal).await;
            return;
        }

        // Green and red wait with one eye on the event channel, so a press
        // arriving mid-phase shortens the wait.
        if !self.light.pedestrian_waiting() {
            if let Some(event) = receive_with_timeout(self.events, nominal).await {
                self.on_event(event);
            }
        }

        if self.light.pedestrian_waiting() && self.light.phase() == Phase::CarGreen {
            // Give cars a moment before pulling their green.
            Timer::after(self.timings.pedestrian_grace).await;
        }
        // A waiting pedestrian skips the idle remainder of CarRed entirely.
    }

    /// One full phase of the crossing cycle.
    pub async fn step(&mut self) {
        self.drain_events();
        self.assert_signals();
        self.wait_out_phase().await;

        if self.light.phase() == Phase::PedestrianGreen {
            // The crossing is over; pedestrians get red before cars move.
            self.output.set_signal(LightId::Pedestrian, SignalColor::Red);
            self.ped_history.push(SignalColor::Red);
        }

        self.light.to_next_phase();
        info!("entering phase {:?}", self.light.phase());
    }

    pub async fn run(mut self) -> ! {
        info!("initial traffic light state set");
        loop {
            self.step().await;
        }
    }
}
