//! Pip-Boy - wrist computer display engine
//!
//! Boots the RobCo terminal, pre-renders the maps, then runs the tabbed
//! interface on a framebuffer with a CRT-style overlay. Input arrives from
//! the keyboard and from a serial control pad.
//!
//! # Usage
//!
//! ```bash
//! # Embedded default configuration
//! pipboy
//!
//! # Custom config file
//! pipboy --config /etc/pipboy/pipboy.toml
//!
//! # No framebuffer, no terminal
//! pipboy --headless
//!
//! # Verbose logging
//! RUST_LOG=debug pipboy
//! ```

mod assets;
mod boot;
mod channels;
mod config;
mod engine;
mod input;
mod pages;
mod serial;
mod tasks;

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use pipboy_display::{DisplayBackend, FramebufferBackend, MemoryBackend};
use pipboy_drivers::{
    spawn_capture, CameraConfig, CommandSound, Coords, FixedPosition, SilentSound, SoundOutput,
};
use pipboy_hal::UartConfig;
use pipboy_hal_linux::SerialPort;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::assets::Assets;
use crate::channels::{CAMERA_FRAME, SHUTDOWN};
use crate::config::{load_config, BackendKind, PipboyConfig};
use crate::engine::Engine;
use crate::input::TerminalInput;
use crate::pages::{build_registry, CueQueue};
use crate::serial::SerialInput;

/// Pip-Boy display engine
#[derive(Parser, Debug)]
#[command(name = "pipboy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "PIPBOY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render to memory and ignore the terminal
    #[arg(long)]
    headless: bool,
}

/// Log lines go to stderr; stdout belongs to the raw-mode terminal
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_subscriber(filter, io::stderr).init();
}

fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .finish()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_logging();
    info!("Pip-Boy starting...");

    if let Err(e) = run(spawner).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    let code = SHUTDOWN.wait().await;
    info!("Pip-Boy stopped");
    std::process::exit(code);
}

async fn run(spawner: Spawner) -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("configuration")?;
    let engine_config = config.engine_config();
    let (width, height) = (engine_config.canvas.width, engine_config.canvas.height);

    let mut display = open_display(&config, args.headless)?;
    let mut sound: Box<dyn SoundOutput> = if config.sound.enabled {
        Box::new(
            CommandSound::new(config.sound.player.clone(), config.sound.directory.clone())
                .with_hum_volume_arg(config.sound.hum_volume_arg.clone()),
        )
    } else {
        Box::new(SilentSound)
    };
    let serial = open_serial(&config);

    let camera = if config.camera.enabled {
        let camera_config = if config.camera.command.is_empty() {
            CameraConfig::rpicam(width, height)
        } else {
            CameraConfig {
                command: config.camera.command.clone(),
                width,
                height,
            }
        };
        if let Err(e) = spawn_capture(camera_config, &CAMERA_FRAME) {
            warn!("camera thread not started: {}", e);
        }
        Some(&CAMERA_FRAME)
    } else {
        None
    };

    let assets = Assets::load(config.assets.directory.as_deref(), width, height)
        .context("assets")?;

    let mut gps = FixedPosition(Coords::new(config.gps.latitude, config.gps.longitude));
    let mut booted = boot::prepare(&engine_config, &assets, &mut gps, sound.as_mut());

    if !config.boot.quickload {
        boot::show_logo(
            &mut booted.compositor,
            &assets.logo,
            sound.as_mut(),
            display.as_mut(),
        )
        .context("boot logo")?;
        Timer::after(Duration::from_millis(config.boot.logo_hold_ms)).await;
    }

    let cues = CueQueue::default();
    let registry = build_registry(booted.maps, camera, &cues, width, height);
    let mut engine = Engine::new(
        &engine_config,
        registry,
        booted.compositor,
        display,
        sound,
        serial,
        Rc::clone(&cues),
    );
    engine.start().context("first page")?;

    let input = if args.headless {
        None
    } else {
        match TerminalInput::open() {
            Ok(input) => Some(input),
            Err(e) => {
                warn!("keyboard input unavailable: {}", e);
                None
            }
        }
    };

    spawner
        .spawn(tasks::render_task(
            engine,
            input,
            engine_config.frame_period_us(),
        ))
        .map_err(|e| anyhow::anyhow!("render task: {:?}", e))?;

    Ok(())
}

fn open_display(config: &PipboyConfig, headless: bool) -> Result<Box<dyn DisplayBackend>> {
    let canvas = &config.display.canvas;
    if headless || config.display.backend == BackendKind::Memory {
        info!("rendering to memory ({}x{})", canvas.width, canvas.height);
        return Ok(Box::new(MemoryBackend::new(canvas.width, canvas.height, 1)));
    }
    let framebuffer = FramebufferBackend::open(&config.display.device)
        .with_context(|| format!("framebuffer {}", config.display.device.display()))?;
    Ok(Box::new(framebuffer))
}

/// Open the control pad link; a missing port only disables the pad
fn open_serial(config: &PipboyConfig) -> SerialInput<SerialPort> {
    if !config.serial.enabled {
        return SerialInput::disabled();
    }
    let uart_config = UartConfig {
        baudrate: config.serial.baudrate,
        ..UartConfig::default()
    };
    let mut serial = match SerialPort::open(&config.serial.device, &uart_config) {
        Ok(port) => {
            info!("serial pad on {}", port.path().display());
            SerialInput::new(port)
        }
        Err(e) => {
            warn!("serial pad disabled: {}", e);
            SerialInput::disabled()
        }
    };
    if let Some(mode) = config.serial.gauge_mode {
        serial.send_gauge_mode(mode);
    }
    serial
}
