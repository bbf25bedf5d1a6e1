use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use statusbar_sync::config::{watch_settings_file, AppConfig, SettingsStore};
use statusbar_sync::core::{
    device_class_or_init, Broadcaster, ConfigStore, IconSink, LabelSink, SinkResult,
    SystemTimeSource, TimeSource,
};
use statusbar_sync::sources::{BatteryController, BatteryEvent, ClockEvent, ClockWidget};
use statusbar_types::settings::{STATUS_BAR_AM_PM, STATUS_BAR_BATTERY, TIME_12_24};
use statusbar_types::{BatteryIcon, DeviceClass, DisplayText};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// statusbar-sync - status bar battery and clock indicators
#[derive(Parser, Debug)]
#[command(name = "statusbar-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Settings file (defaults to the platform config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deliver one battery event and print what the sinks show
    Battery {
        /// Battery level in percent
        #[arg(short, long, default_value = "100")]
        level: i32,

        /// Charger connected
        #[arg(short, long)]
        plugged: bool,

        /// Battery style (0=normal 1=text 2=circle 3=bar 4=fatty 5=digital 6=gone)
        #[arg(short, long)]
        style: Option<i32>,
    },
    /// Render the clock once
    Clock {
        /// AM/PM style (0=normal 1=small 2=gone)
        #[arg(short, long)]
        am_pm: Option<i32>,

        /// Time zone id, e.g. Europe/Paris
        #[arg(short, long)]
        tz: Option<String>,

        /// Use the 24 hour pattern
        #[arg(long = "24h")]
        twenty_four_hour: bool,
    },
    /// Keep the clock ticking and reload settings when the file changes
    Watch {
        /// Tick interval in milliseconds
        #[arg(long, default_value = "60000")]
        tick_ms: u64,

        /// Battery level shown while watching
        #[arg(short, long, default_value = "100")]
        level: i32,
    },
}

/// Icon sink printing to stdout
struct ConsoleIcon {
    name: &'static str,
}

impl IconSink for ConsoleIcon {
    fn set_visible(&self, visible: bool) -> SinkResult {
        println!("[{}] visible = {}", self.name, visible);
        Ok(())
    }

    fn set_icon(&self, icon: BatteryIcon) -> SinkResult {
        println!("[{}] icon = {}", self.name, icon.resource_name());
        Ok(())
    }

    fn set_level(&self, level: u8) -> SinkResult {
        println!("[{}] level = {}", self.name, level);
        Ok(())
    }

    fn set_accessibility_text(&self, text: &str) -> SinkResult {
        println!("[{}] description = {}", self.name, text);
        Ok(())
    }
}

/// Label sink printing to stdout; the styled part is shown in brackets
struct ConsoleLabel {
    name: &'static str,
}

impl LabelSink for ConsoleLabel {
    fn set_visible(&self, visible: bool) -> SinkResult {
        println!("[{}] visible = {}", self.name, visible);
        Ok(())
    }

    fn set_text(&self, text: &DisplayText) -> SinkResult {
        match text {
            DisplayText::Plain(text) => println!("[{}] text = {}", self.name, text),
            DisplayText::Styled {
                text,
                span,
                relative_size,
            } => println!(
                "[{}] text = {}[{}]{} (x{})",
                self.name,
                &text[..span.start],
                &text[span.clone()],
                &text[span.end..],
                relative_size
            ),
        }
        Ok(())
    }
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting statusbar-sync v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };
    let config = load_config(&config_path);
    let device = device_class_or_init(|| config.display);
    let store = Rc::new(SettingsStore::from_values(config.settings.clone()));

    match cli.command {
        Command::Battery {
            level,
            plugged,
            style,
        } => {
            if let Some(style) = style {
                store.put_int(STATUS_BAR_BATTERY, style);
            }
            let events = Broadcaster::<BatteryEvent>::new();
            let controller = BatteryController::new(store, &events, config.battery_strings);
            controller
                .borrow_mut()
                .register_icon_sink(Rc::new(ConsoleIcon { name: "battery icon" }));
            controller
                .borrow_mut()
                .register_label_sink(Rc::new(ConsoleLabel { name: "battery label" }));

            events.emit(&BatteryEvent { level, plugged });
        }
        Command::Clock {
            am_pm,
            tz,
            twenty_four_hour,
        } => {
            if let Some(am_pm) = am_pm {
                store.put_int(STATUS_BAR_AM_PM, am_pm);
            }
            if twenty_four_hour {
                store.put_int(TIME_12_24, 24);
            }
            let events = Broadcaster::<ClockEvent>::new();
            let time: Rc<dyn TimeSource> = Rc::new(SystemTimeSource);
            let clock = ClockWidget::new(store, time, config.locale, device);
            clock
                .borrow_mut()
                .register_label_sink(Rc::new(ConsoleLabel { name: "clock" }));

            clock.borrow_mut().attach(&events);
            if let Some(tz) = tz {
                events.emit(&ClockEvent::TimezoneChanged(Some(tz)));
            }
        }
        Command::Watch { tick_ms, level } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to build runtime")?;
            runtime.block_on(watch(
                config_path,
                config,
                store,
                device,
                Duration::from_millis(tick_ms.max(1)),
                level,
            ))?;
        }
    }

    Ok(())
}

/// Load settings, falling back to defaults when the file is missing or bad
fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        info!("No settings at {}, using defaults", path.display());
        return AppConfig::default();
    }
    AppConfig::load_from_path(path).unwrap_or_else(|e| {
        warn!("[config] Error (using defaults): {:#}", e);
        AppConfig::default()
    })
}

async fn watch(
    config_path: PathBuf,
    config: AppConfig,
    store: Rc<SettingsStore>,
    device: DeviceClass,
    tick: Duration,
    level: i32,
) -> Result<()> {
    let battery_events = Broadcaster::<BatteryEvent>::new();
    let clock_events = Broadcaster::<ClockEvent>::new();

    let battery = BatteryController::new(
        store.clone() as Rc<dyn ConfigStore>,
        &battery_events,
        config.battery_strings.clone(),
    );
    battery
        .borrow_mut()
        .register_icon_sink(Rc::new(ConsoleIcon { name: "battery icon" }));
    battery
        .borrow_mut()
        .register_label_sink(Rc::new(ConsoleLabel { name: "battery label" }));

    let time: Rc<dyn TimeSource> = Rc::new(SystemTimeSource);
    let clock = ClockWidget::new(
        store.clone() as Rc<dyn ConfigStore>,
        time,
        config.locale.clone(),
        device,
    );
    clock
        .borrow_mut()
        .register_label_sink(Rc::new(ConsoleLabel { name: "clock" }));

    battery_events.emit(&BatteryEvent {
        level,
        plugged: false,
    });
    clock.borrow_mut().attach(&clock_events);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _watcher = match watch_settings_file(&config_path, tx) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Hot reload disabled: {:#}", e);
            None
        }
    };

    let mut interval = tokio::time::interval(tick);
    // The first tick completes immediately; the clock already rendered on attach
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => clock_events.emit(&ClockEvent::TimeTick),
            Some(()) = rx.recv() => {
                match AppConfig::load_from_path(&config_path) {
                    Ok(reloaded) => {
                        let changed = store.apply(&reloaded.settings);
                        info!("Settings reloaded, {} key(s) changed", changed);
                        battery.borrow_mut().set_strings(reloaded.battery_strings);
                        clock.borrow_mut().set_patterns(reloaded.locale);
                    }
                    Err(e) => warn!("Ignoring settings change: {:#}", e),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    clock.borrow_mut().detach();
    info!("Stopped");
    Ok(())
}
