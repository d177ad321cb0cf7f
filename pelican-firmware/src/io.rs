/*
 * The I/O module for the crossing. This module is the only part of the
 * program that is device-specific: it maps the core's signal colors onto
 * the lamp output pins and wraps the pedestrian button's EXTI line in the
 * core's `ButtonInput` trait.
 */

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output};
use enum_ordinalize::Ordinalize;

use pelican_core::{ButtonInput, LightId, SignalColor, SignalOutput};

#[derive(Ordinalize, Clone, Copy)]
#[repr(usize)]
pub enum Lamp {
    CarRed,
    CarAmber,
    CarGreen,
    PedestrianRed,
    PedestrianGreen,
}

pub struct LightOutputs {
    outputs: [Output<'static>; Lamp::VARIANT_COUNT],
}

impl LightOutputs {
    /// Takes the lamp pins in `Lamp` ordinal order.
    pub fn new(outputs: [Output<'static>; Lamp::VARIANT_COUNT]) -> Self {
        LightOutputs { outputs }
    }

    // Deal with active-high or active-low here, so that the state machine
    // can just use easy to understand `true` for on logic.
    fn light(&mut self, lamp: Lamp, on: bool) {
        self.outputs[lamp.ordinal()].set_level(if on { Level::High } else { Level::Low });
    }
}

impl SignalOutput for LightOutputs {
    fn set_signal(&mut self, light: LightId, color: SignalColor) {
        match light {
            LightId::Car => {
                self.light(Lamp::CarRed, color == SignalColor::Red);
                self.light(Lamp::CarAmber, color == SignalColor::Yellow);
                self.light(Lamp::CarGreen, color == SignalColor::Green);
            }
            LightId::Pedestrian => {
                self.light(Lamp::PedestrianRed, color != SignalColor::Green);
                self.light(Lamp::PedestrianGreen, color == SignalColor::Green);
            }
        }
    }
}

/*
 * The pedestrian button, wired active-low against the internal pull-up. The
 * EXTI interrupt is the minimal-work handler: it only wakes the task that is
 * awaiting the edge, the debounce logic never runs at interrupt level.
 */
pub struct PedestrianButton {
    input: ExtiInput<'static>,
}

impl PedestrianButton {
    pub fn new(input: ExtiInput<'static>) -> Self {
        PedestrianButton { input }
    }
}

impl ButtonInput for PedestrianButton {
    async fn wait_for_press_edge(&mut self) {
        self.input.wait_for_falling_edge().await
    }

    async fn wait_for_release(&mut self) {
        self.input.wait_for_rising_edge().await
    }

    fn is_pressed(&self) -> bool {
        self.input.is_low()
    }
}
