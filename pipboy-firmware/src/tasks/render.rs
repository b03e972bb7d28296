//! Render task
//!
//! Runs the engine at the configured frame rate until exit is requested or
//! a present fails, then releases the serial port and the terminal.

use embassy_time::{Duration, Instant, Ticker};
use pipboy_hal_linux::SerialPort;
use tracing::{error, info};

use crate::channels::SHUTDOWN;
use crate::engine::Engine;
use crate::input::TerminalInput;

/// Render task - one engine step per tick
#[embassy_executor::task]
pub async fn render_task(
    mut engine: Engine<SerialPort>,
    mut input: Option<TerminalInput>,
    frame_period_us: u64,
) {
    info!("Render task started");

    let mut ticker = Ticker::every(Duration::from_micros(frame_period_us));
    let mut window_start = Instant::now();
    let mut frames: u64 = 0;

    let code = loop {
        let local = input.as_mut().map(TerminalInput::poll).unwrap_or_default();
        match engine.step(&local) {
            Ok(outcome) if outcome.exit => break 0,
            Ok(outcome) => {
                frames += 1;
                if outcome.wrapped {
                    let elapsed = window_start.elapsed().as_micros().max(1);
                    let fps = frames as f64 * 1_000_000.0 / elapsed as f64;
                    info!("{:.1} fps", fps);
                    window_start = Instant::now();
                    frames = 0;
                }
            }
            Err(e) => {
                error!("present failed: {}", e);
                break 1;
            }
        }
        ticker.next().await;
    };

    engine.shutdown();
    // restore the terminal before the process goes away
    drop(input);
    SHUTDOWN.signal(code);
}
