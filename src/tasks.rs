//! The two periodic tasks that share the [`SchedulerContext`] with the main task.
//!
//! Each runs on its own interrupt executor so that it preempts the main task, which spins in
//! thread mode.

use core::convert::Infallible;

use embassy_executor::SendSpawner;
use embassy_rp::gpio::{self, Level};
use embassy_time::{Duration, Ticker};

use crate::display_buffer::{CELL_COUNT, SEGMENT_COUNT};
use crate::output_array::OutputArray;
use crate::scheduler::{Frame, RefreshCursor, SchedulerContext};
use crate::ticks::TICK_MILLIS;
use crate::Result;

/// Time each digit (or dark frame) is shown.
pub const REFRESH_PERIOD: Duration = Duration::from_micros(100);

pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MILLIS);

/// Spawns the display refresh onto `spawner`.
///
/// # Errors
///
/// Returns [`crate::Error::TaskSpawn`] if the task is already running.
pub fn spawn_refresh(
    spawner: SendSpawner,
    context: &'static SchedulerContext,
    cells: OutputArray<'static, CELL_COUNT>,
    segments: OutputArray<'static, SEGMENT_COUNT>,
) -> Result<()> {
    let token = refresh_loop(context, cells, segments)?;
    spawner.spawn(token);
    Ok(())
}

/// Spawns the 10 ms tick onto `spawner`.
///
/// # Errors
///
/// Returns [`crate::Error::TaskSpawn`] if the task is already running.
pub fn spawn_tick(
    spawner: SendSpawner,
    context: &'static SchedulerContext,
    adjust: gpio::Input<'static>,
    advance: gpio::Input<'static>,
) -> Result<()> {
    let token = tick_loop(context, adjust, advance)?;
    spawner.spawn(token);
    Ok(())
}

#[embassy_executor::task]
async fn refresh_loop(
    context: &'static SchedulerContext,
    cells: OutputArray<'static, CELL_COUNT>,
    segments: OutputArray<'static, SEGMENT_COUNT>,
) -> ! {
    // If it returns, something went wrong.
    let Err(err) = inner_refresh_loop(context, cells, segments).await;
    panic!("{err}");
}

async fn inner_refresh_loop(
    context: &'static SchedulerContext,
    mut cells: OutputArray<'static, CELL_COUNT>,
    mut segments: OutputArray<'static, SEGMENT_COUNT>,
) -> Result<Infallible> {
    let mut cursor = RefreshCursor::default();
    let mut ticker = Ticker::every(REFRESH_PERIOD);
    loop {
        // Off first, so the new segments never ghost onto the previous digit.
        cells.set_all(Level::High);
        if let Frame::Lit { digit, segments: bits } = context.refresh_step(&mut cursor) {
            segments.set_from_bits(bits);
            cells.set_level_at_index(digit, Level::Low)?;
        }
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn tick_loop(
    context: &'static SchedulerContext,
    adjust: gpio::Input<'static>,
    advance: gpio::Input<'static>,
) -> ! {
    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        // Closed pulls the input low.
        context.debounce_tick(adjust.is_low(), advance.is_low());
        ticker.next().await;
    }
}
