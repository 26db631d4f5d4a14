//! lovethyeyesd - The lovethyeyes background service
//!
//! This is the main entry point for the lovethyeyes service.
//! It wires together all the components:
//! - Configuration loading
//! - Stats store and background persister
//! - Core engine
//! - Host adapter (Linux desktop notifications, session logout)

mod persist;

use anyhow::{Context, Result};
use clap::Parser;
use lovethyeyes_config::load_config_or_default;
use lovethyeyes_core::{CoreEngine, CoreEvent, MessageCatalog};
use lovethyeyes_host_api::{HostEvent, Notifier, SessionTerminator};
use lovethyeyes_host_linux::{LinuxNotifier, linux_session_terminator};
use lovethyeyes_store::{JsonFileStore, StatsStore};
use lovethyeyes_util::{default_config_path, format_hours_minutes, is_mock_time_active, on_off};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::persist::BackgroundPersister;

/// lovethyeyesd - Eye-break reminders for desktop users
#[derive(Parser, Debug)]
#[command(name = "lovethyeyesd")]
#[command(about = "Reminds you to rest your eyes and keeps score", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/lovethyeyes/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Stats file override (or set LOVETHYEYES_STATS env var)
    #[arg(short, long, env = "LOVETHYEYES_STATS")]
    stats_path: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Start with notifications turned off (SIGUSR1 toggles)
    #[arg(long)]
    no_notifications: bool,

    /// Start with audio alerts turned off (SIGUSR2 toggles)
    #[arg(long)]
    no_audio: bool,
}

/// Main service state
struct Service {
    engine: CoreEngine,
    notifier: Arc<dyn Notifier>,
    terminator: Arc<dyn SessionTerminator>,
    file_store: Arc<JsonFileStore>,
    persister: Arc<BackgroundPersister>,
    tick_interval: Duration,
}

impl Service {
    async fn new(args: &Args) -> Result<Self> {
        // Load configuration
        let mut settings = load_config_or_default(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        if let Some(stats_path) = &args.stats_path {
            settings.service.stats_path = stats_path.clone();
        }
        if args.no_notifications {
            settings.notifications.enabled = false;
        }
        if args.no_audio {
            settings.notifications.audio = false;
        }

        info!(config_path = %args.config.display(), "Configuration loaded");

        let catalog = MessageCatalog::from_overrides(&settings.messages)
            .context("Invalid message catalog")?;

        // Create the stats directory
        let stats_path = settings.service.stats_path.clone();
        if let Some(dir) = stats_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create stats directory {:?}", dir))?;
        }

        // Initialize store
        let file_store = Arc::new(JsonFileStore::new(&stats_path));
        if !file_store.is_healthy() {
            warn!(stats_path = %stats_path.display(), "Stats directory is not usable");
        }
        let persister = Arc::new(BackgroundPersister::spawn(
            file_store.clone(),
            settings.service.persist_timeout,
        ));

        info!(stats_path = %stats_path.display(), "Store initialized");

        // Initialize host adapter
        let notifier = Arc::new(LinuxNotifier::new());
        let probe = notifier.clone();
        let notifier_healthy = tokio::task::spawn_blocking(move || probe.is_healthy())
            .await
            .unwrap_or(false);
        if !notifier_healthy {
            warn!("No notification server found, prompts will fail until one appears");
        }

        let terminator = Arc::new(linux_session_terminator());

        // Initialize core engine
        let engine = CoreEngine::new(
            &settings,
            catalog,
            persister.clone(),
            lovethyeyes_util::now(),
        );

        info!(
            short_break = %format_hours_minutes(settings.intervals.short_break),
            long_break = %format_hours_minutes(settings.intervals.long_break),
            stats = %format_hours_minutes(settings.intervals.stats),
            notifications = on_off(engine.notifications_enabled()),
            audio = on_off(engine.audio_enabled()),
            mock_time = is_mock_time_active(),
            "Love Thy Eyes started"
        );

        Ok(Self {
            engine,
            notifier,
            terminator,
            file_store,
            persister,
            tick_interval: settings.intervals.tick,
        })
    }

    async fn run(self) -> Result<()> {
        // Get channels
        let mut host_events = self.notifier.subscribe();

        // Wrap mutable state
        let engine = Arc::new(Mutex::new(self.engine));
        let notifier = self.notifier.clone();
        let terminator = self.terminator.clone();

        // Set up signal handlers
        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup())
            .context("Failed to create SIGHUP handler")?;
        let mut sigusr1 = signal(SignalKind::user_defined1())
            .context("Failed to create SIGUSR1 handler")?;
        let mut sigusr2 = signal(SignalKind::user_defined2())
            .context("Failed to create SIGUSR2 handler")?;

        // Main event loop
        let mut tick_timer = tokio::time::interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Service running");

        loop {
            tokio::select! {
                // Signal: SIGTERM or SIGINT - graceful shutdown
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }

                // Signal: SIGHUP - graceful shutdown (session ending)
                _ = sighup.recv() => {
                    info!("Received SIGHUP, shutting down gracefully");
                    break;
                }

                // Signal: SIGUSR1/SIGUSR2 - runtime toggles
                _ = sigusr1.recv() => {
                    engine.lock().await.toggle_notifications();
                }
                _ = sigusr2.recv() => {
                    engine.lock().await.toggle_audio();
                }

                // Tick timer - check break and stats timers
                _ = tick_timer.tick() => {
                    let now = lovethyeyes_util::now();

                    let events = {
                        let mut engine = engine.lock().await;
                        engine.tick(now)
                    };

                    Self::handle_core_events(&notifier, &terminator, events);
                }

                // Host events (notification responses)
                Some(host_event) = host_events.recv() => {
                    Self::handle_host_event(&engine, &notifier, &terminator, host_event).await;
                }
            }
        }

        // Graceful shutdown
        info!("Shutting down lovethyeyesd");

        self.persister.shutdown().await;
        {
            let mut engine = engine.lock().await;
            let now = lovethyeyes_util::now();
            match engine.persist_to(self.file_store.as_ref(), now) {
                Ok(()) => info!(
                    love_score = engine.record().love_score,
                    hatred_score = engine.record().hatred_score,
                    "Final stats saved"
                ),
                Err(e) => error!(error = %e, "Failed to save final stats"),
            }
        }

        info!("Shutdown complete");
        Ok(())
    }

    /// A batch of core events runs on its own task so a slow notification
    /// server never holds up the next tick. Events within the batch are
    /// handled in order, keeping short before long before stats.
    fn handle_core_events(
        notifier: &Arc<dyn Notifier>,
        terminator: &Arc<dyn SessionTerminator>,
        events: Vec<CoreEvent>,
    ) -> Option<JoinHandle<()>> {
        if events.is_empty() {
            return None;
        }

        let notifier = notifier.clone();
        let terminator = terminator.clone();
        Some(tokio::spawn(async move {
            for event in events {
                Self::handle_core_event(notifier.as_ref(), terminator.as_ref(), event).await;
            }
        }))
    }

    async fn handle_core_event(
        notifier: &dyn Notifier,
        terminator: &dyn SessionTerminator,
        event: CoreEvent,
    ) {
        match event {
            CoreEvent::BreakDue { request, .. } | CoreEvent::StatsDue { request } => {
                let prompt = request.prompt;
                match notifier.dispatch(request).await {
                    Ok(dispatch_id) => info!(%dispatch_id, %prompt, "Notification dispatched"),
                    Err(e) => warn!(%prompt, error = %e, "Failed to dispatch notification"),
                }
            }

            CoreEvent::SessionTerminationRequested => {
                info!(strategy = terminator.name(), "Logout requested, ending session");
                if let Err(e) = terminator.terminate().await {
                    error!(error = %e, "Session termination failed");
                }
            }
        }
    }

    async fn handle_host_event(
        engine: &Arc<Mutex<CoreEngine>>,
        notifier: &Arc<dyn Notifier>,
        terminator: &Arc<dyn SessionTerminator>,
        event: HostEvent,
    ) {
        let dispatch_id = event.dispatch_id();
        let Some(action) = event.resolved_action() else {
            debug!(%dispatch_id, "Notification closed without an action");
            return;
        };

        info!(%dispatch_id, %action, "User responded");

        let events = {
            let mut engine = engine.lock().await;
            engine.apply_action(action, lovethyeyes_util::now())
        };

        Self::handle_core_events(notifier, terminator, events);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "lovethyeyesd starting"
    );

    // Create and run the service
    let service = Service::new(&args).await?;
    service.run().await
}
