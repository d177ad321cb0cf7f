/*
 * The event channel between the button debouncer and the control loop.
 *
 * A bounded multi-producer, single-consumer queue. The debouncer enqueues
 * without blocking (a full channel drops the event rather than stalling the
 * debounce timing), the control loop drains it at every phase boundary.
 */

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Duration, Timer};

use crate::config::EVENT_CHANNEL_CAPACITY;

/// The events the control loop reacts to. Only one kind exists today; new
/// sources extend this enum rather than inventing a second channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ButtonPress,
}

pub type EventChannel = Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_CAPACITY>;
pub type EventSender<'ch> = Sender<'ch, CriticalSectionRawMutex, Event, EVENT_CHANNEL_CAPACITY>;
pub type EventReceiver<'ch> = Receiver<'ch, CriticalSectionRawMutex, Event, EVENT_CHANNEL_CAPACITY>;

/*
 * Dequeue with a bounded wait, racing the receive against a timer the same
 * way the debouncer races its input against the quiet interval.
 */
pub async fn receive_with_timeout(events: EventReceiver<'_>, timeout: Duration) -> Option<Event> {
    match select(events.receive(), Timer::after(timeout)).await {
        Either::First(event) => Some(event),
        Either::Second(()) => None,
    }
}
