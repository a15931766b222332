//! Wires config, tracking, audio, and the controller together and drives
//! them from stdin on a single event loop.

use std::sync::{Arc, Mutex, PoisonError};

use envelope_common::{Event, EventBus, TrackingStatus};
use envelope_config::EnvelopeConfig;
use envelope_core::{
    AudioChannel, ClickTracker, FlagStore, HttpDispatcher, RevealController, SharedAudio,
    ToastNotifier, TrackingStatusCell,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::playback::ProbingChannel;
use crate::render;

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "" => return None,
            "open" | "o" => Command::Open,
            "close" | "c" => Command::Close,
            "status" | "s" => Command::Status,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(word),
        };
        Some(command)
    }
}

pub struct EnvelopeApp {
    config: EnvelopeConfig,
    bus: Arc<EventBus>,
    status: TrackingStatusCell,
    channel: Arc<Mutex<ProbingChannel>>,
    controller: RevealController,
    notifier: ToastNotifier,
}

impl EnvelopeApp {
    /// Build the interaction. Must be called from inside the runtime.
    pub fn new(config: EnvelopeConfig, store: Arc<dyn FlagStore>) -> envelope_common::Result<Self> {
        let bus = Arc::new(EventBus::default());
        let status = TrackingStatusCell::new(Arc::clone(&bus));

        let tracker = if config.tracking.enabled {
            let dispatcher = HttpDispatcher::from_config(&config.tracking)?;
            info!(endpoint = dispatcher.endpoint(), "tracking enabled");
            Some(ClickTracker::new(
                store,
                Arc::new(dispatcher),
                status.clone(),
                &config.tracking,
            ))
        } else {
            info!("tracking disabled");
            None
        };

        let channel = Arc::new(Mutex::new(ProbingChannel::new(&config.audio)?));
        let audio: SharedAudio = channel.clone();
        let controller = RevealController::new(&config, audio, tracker, Arc::clone(&bus));
        let notifier = ToastNotifier::spawn(status.clone(), &config.toast, Arc::clone(&bus));

        Ok(Self {
            config,
            bus,
            status,
            channel,
            controller,
            notifier,
        })
    }

    /// Apply one command. Returns `false` when the loop should stop.
    pub fn handle(&self, command: Command) -> bool {
        match command {
            Command::Open => {
                if !self.controller.activate_open() {
                    println!("(already open)");
                }
            }
            Command::Close => {
                if !self.controller.activate_close() {
                    println!("(nothing to close)");
                }
            }
            Command::Status => {
                println!(
                    "{}",
                    render::status_line(
                        self.controller.state(),
                        self.controller.is_card_visible(),
                        self.status.get(),
                    )
                );
                let channel = self.channel.lock().unwrap_or_else(PoisonError::into_inner);
                println!(
                    "{}",
                    render::audio_line(
                        channel.is_playing(),
                        channel.is_looping(),
                        channel.loaded_source().as_deref(),
                        channel.position(),
                    )
                );
                println!("{}", render::toast_line(self.notifier.current().as_ref()));
            }
            Command::Help => println!("{}", render::HELP),
            Command::Quit => return false,
            Command::Unknown(word) => println!("unknown command {word:?}; {}", render::HELP),
        }
        true
    }

    fn render(&self, event: &Event) {
        if let Event::ParticlesBurst(_) = event {
            println!(
                "{}",
                render::burst_summary(&self.controller.particles(), self.controller.generator())
            );
        } else if let Some(line) = render::event_line(event) {
            println!("{line}");
        }
    }

    pub async fn run(self) -> envelope_common::Result<()> {
        let mut events = self.bus.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("A sealed envelope. {}", render::HELP);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if let Some(command) = Command::parse(&line) {
                        if !self.handle(command) {
                            break;
                        }
                    }
                }
                event = events.recv() => match event {
                    Ok(event) => self.render(&event),
                    Err(RecvError::Lagged(n)) => warn!("renderer lagged, skipped {n} events"),
                    Err(RecvError::Closed) => break,
                },
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Stop timers and give an in-flight dispatch the chance to finish, so
    /// the persisted flag does not outlive an event that was never sent.
    async fn shutdown(&self) {
        self.controller.shutdown();
        self.notifier.shutdown();

        if self.status.get() == TrackingStatus::Sending {
            let mut rx = self.status.subscribe();
            let settled = rx.wait_for(|s| *s != TrackingStatus::Sending);
            if tokio::time::timeout(self.config.tracking.timeout(), settled)
                .await
                .is_err()
            {
                warn!("tracking request still pending at exit");
            }
        }

        self.bus.publish(Event::Shutdown);
        info!("envelope closed");
    }
}
