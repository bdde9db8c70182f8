//! A four-digit seven-segment LED clock with two buttons, light-following brightness, and a
//! thermometer.
//!
//! Runs on a Raspberry Pi Pico RP2040: `cargo run --release --target thumbv6m-none-eabi --features pico1`.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt::{self, InterruptExt, Priority};
use panic_probe as _;
// This crate's own internal library
use segment_clock::hardware::Hardware;
use segment_clock::{
    ClockOptions, MainTask, Never, Peripherals, Result, SchedulerContext, ScratchStore, tasks,
};

/// Shared by the refresh, the tick, and the main task.
static CONTEXT: SchedulerContext = SchedulerContext::new();

/// The refresh preempts everything, including the tick.
static EXECUTOR_REFRESH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_TICK: InterruptExecutor = InterruptExecutor::new();

/// First of the watchdog scratch registers that hold the settings.
const SETTINGS_SCRATCH: usize = 0;

#[interrupt]
#[expect(unsafe_code, reason = "The executor is driven only from its own interrupt")]
unsafe fn SWI_IRQ_1() {
    unsafe {
        EXECUTOR_REFRESH.on_interrupt();
    }
}

#[interrupt]
#[expect(unsafe_code, reason = "The executor is driven only from its own interrupt")]
unsafe fn SWI_IRQ_0() {
    unsafe {
        EXECUTOR_TICK.on_interrupt();
    }
}

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let Err(err) = inner_main();
    panic!("{err}");
}

fn inner_main() -> Result<Never> {
    let hardware = Hardware::default();
    info!("Starting with {}", ClockOptions::FIRMWARE);

    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let refresh_spawner = EXECUTOR_REFRESH.start(interrupt::SWI_IRQ_1);
    tasks::spawn_refresh(refresh_spawner, &CONTEXT, hardware.cells, hardware.segments)?;

    interrupt::SWI_IRQ_0.set_priority(Priority::P2);
    let tick_spawner = EXECUTOR_TICK.start(interrupt::SWI_IRQ_0);
    tasks::spawn_tick(tick_spawner, &CONTEXT, hardware.adjust, hardware.advance)?;

    let peripherals = Peripherals {
        rtc: hardware.rtc,
        sensors: hardware.sensors,
        store: ScratchStore::new(hardware.supervisor, SETTINGS_SCRATCH),
        heartbeat: hardware.heartbeat,
    };

    // The main task spins on the tick count in thread mode and never yields.
    MainTask::new(&CONTEXT, &CONTEXT, ClockOptions::FIRMWARE, peripherals).run()
}
