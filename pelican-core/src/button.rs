/*
 * The pedestrian button debouncer.
 *
 * A single physical press makes the contact bounce, which can fire a burst
 * of edge interrupts within microseconds. Reacting to each of them would
 * queue a pile of phantom crossing requests. Instead the interrupt only
 * wakes this task; the task then deliberately does nothing for a quiet
 * interval and re-samples the line once. All edges of one genuine press
 * collapse into at most one accepted event, at the cost of a fixed latency
 * equal to the quiet interval. A press shorter than the quiet interval is
 * discarded as bounce on purpose.
 */

use embassy_time::{Duration, Instant, Timer};
use log::{info, warn};

use crate::events::{Event, EventSender};

/// The edge source collaborator. `wait_for_press_edge` is the interrupt
/// side: the handler does nothing but wake the awaiting task, the timed
/// re-sample never runs in interrupt context.
#[allow(async_fn_in_trait)]
pub trait ButtonInput {
    async fn wait_for_press_edge(&mut self);
    async fn wait_for_release(&mut self);
    fn is_pressed(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Released,
    Debouncing,
    Pressed,
}

pub struct Debouncer<B: ButtonInput> {
    button: B,
    state: ButtonState,
    quiet: Duration,
    last_accepted: Option<Instant>,
}

impl<B: ButtonInput> Debouncer<B> {
    pub fn new(button: B, quiet: Duration) -> Self {
        Debouncer {
            button,
            state: ButtonState::Released,
            quiet,
            last_accepted: None,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Resolves once per validated press: edge, quiet interval, confirming
    /// sample. Spurious edges are swallowed and the wait continues.
    pub async fn next_press(&mut self) {
        loop {
            if self.state == ButtonState::Pressed {
                // Re-arm only after the previous press has been let go.
                self.button.wait_for_release().await;
                self.state = ButtonState::Released;
            }

            self.button.wait_for_press_edge().await;

            // An edge hard on the heels of an accepted press is residual
            // bounce from that press, not a new one.
            if let Some(last_accepted) = self.last_accepted {
                if last_accepted.elapsed() < self.quiet {
                    continue;
                }
            }

            self.state = ButtonState::Debouncing;
            Timer::after(self.quiet).await;

            if self.button.is_pressed() {
                self.state = ButtonState::Pressed;
                self.last_accepted = Some(Instant::now());
                return;
            }

            // The line did not stay asserted through the quiet interval.
            self.state = ButtonState::Released;
        }
    }

    /// The task body: forward each validated press onto the event channel.
    /// A full channel drops the press rather than stalling the debounce
    /// timing; the pedestrian will press again.
    pub async fn run(mut self, events: EventSender<'_>) -> ! {
        loop {
            self.next_press().await;
            info!("valid button press detected");
            if events.try_send(Event::ButtonPress).is_err() {
                warn!("event channel full, dropping button press");
            }
        }
    }
}
