#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::exti::{Channel, ExtiInput};
use embassy_stm32::gpio::{Level, Output, Pin, Pull, Speed};
use embassy_stm32::usart::{Config, Uart};
use embassy_stm32::{bind_interrupts, mode, peripherals, usart};
use embassy_time::Timer;
use panic_halt as _;

use pelican_core::{
    CrossingController, CrossingStatus, Debouncer, EventChannel, EventSender, SignalColor,
    SignalHistory, Timings,
};

mod io;
use io::{LightOutputs, PedestrianButton};

// Constructed once, for the lifetime of the process, and handed to the tasks
// that need them by reference.
static EVENTS: EventChannel = EventChannel::new();
static CAR_HISTORY: SignalHistory = SignalHistory::new();
static PED_HISTORY: SignalHistory = SignalHistory::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    rtt_target::rtt_init_log!();

    let peripherals = embassy_stm32::init(Default::default());

    bind_interrupts!(struct Irqs {
        USART1 => usart::InterruptHandler<peripherals::USART1>;
    });
    let usart = Uart::new(
        peripherals.USART1,
        peripherals.PA10,
        peripherals.PA9,
        Irqs,
        peripherals.DMA1_CH4,
        peripherals.DMA1_CH5,
        Config::default(), // 115200 baud
    )
    .unwrap();

    // Lamp pins in `Lamp` ordinal order. Cars start on green and pedestrians
    // on red, matching the controller's initial phase.
    let outputs = LightOutputs::new([
        Output::new(peripherals.PB10.degrade(), Level::Low, Speed::Low), // car red
        Output::new(peripherals.PB12.degrade(), Level::Low, Speed::Low), // car amber
        Output::new(peripherals.PB14.degrade(), Level::High, Speed::Low), // car green
        Output::new(peripherals.PB6.degrade(), Level::High, Speed::Low), // pedestrian red
        Output::new(peripherals.PB8.degrade(), Level::Low, Speed::Low),  // pedestrian green
    ]);

    let button = PedestrianButton::new(ExtiInput::new(
        peripherals.PE11.degrade(),
        peripherals.EXTI11.degrade(),
        Pull::Up,
    ));

    let timings = Timings::DEFAULT;
    let controller = CrossingController::new(
        EVENTS.receiver(),
        outputs,
        &CAR_HISTORY,
        &PED_HISTORY,
        timings,
    );
    let debouncer = Debouncer::new(button, timings.debounce);

    spawner.spawn(control_task(controller)).unwrap();
    spawner
        .spawn(button_task(debouncer, EVENTS.sender()))
        .unwrap();
    spawner.spawn(status_task(usart)).unwrap();
}

#[embassy_executor::task]
async fn control_task(controller: CrossingController<'static, LightOutputs>) -> ! {
    controller.run().await
}

#[embassy_executor::task]
async fn button_task(debouncer: Debouncer<PedestrianButton>, events: EventSender<'static>) -> ! {
    debouncer.run(events).await
}

/*
 * Writes one JSON status line per second over the serial port. The line is
 * built from the signal histories, not from the state machine's own fields,
 * so this task never races the control loop.
 */
#[embassy_executor::task]
async fn status_task(mut usart: Uart<'static, mode::Async>) -> ! {
    let status = CrossingStatus::new(&CAR_HISTORY, &PED_HISTORY);
    loop {
        usart.write(b"{\"car_light\":\"").await.unwrap();
        usart.write(color_name(status.recent_car_state())).await.unwrap();
        usart.write(b"\",\"pedestrian_light\":\"").await.unwrap();
        usart
            .write(color_name(status.recent_pedestrian_state()))
            .await
            .unwrap();
        usart.write(b"\"}\n").await.unwrap();
        Timer::after_secs(1).await;
    }
}

fn color_name(color: SignalColor) -> &'static [u8] {
    match color {
        SignalColor::Green => b"GREEN",
        SignalColor::Yellow => b"YELLOW",
        SignalColor::Red => b"RED",
    }
}
