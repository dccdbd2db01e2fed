use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent};
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::game::{Display, Game, Scheduler, TimerHandle};
use crate::input::{map_key, Command};
use crate::term::TermDisplay;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Everything the game loop reacts to arrives through one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Tick(TimerHandle),
    Timeout(TimerHandle),
    TextShown,
}

/// Timers as tokio tasks that post into the event channel.
pub struct TokioScheduler {
    events: UnboundedSender<Event>,
    next: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events: UnboundedSender<Event>) -> Self {
        TokioScheduler { events, next: 0, tasks: HashMap::new() }
    }

    fn track(&mut self, task: JoinHandle<()>) -> TimerHandle {
        self.tasks.retain(|_, t| !t.is_finished());

        self.next += 1;
        let handle = TimerHandle(self.next);
        self.tasks.insert(handle, task);
        handle
    }

    fn peek_handle(&self) -> TimerHandle {
        TimerHandle(self.next + 1)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        let handle = self.peek_handle();
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(Event::Tick(handle)).is_err() {
                    break;
                }
            }
        });

        debug!(?handle, period_ms = period.as_millis() as u64, "ticker armed");
        self.track(task)
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.peek_handle();
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(Event::Timeout(handle));
        });

        self.track(task)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

/// Reads key presses on a blocking thread until the loop goes away.
fn spawn_input_reader(events: UnboundedSender<Event>) {
    tokio::task::spawn_blocking(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(TermEvent::Key(key)) => {
                    if let Some(command) = map_key(&key) {
                        if events.send(Event::Command(command)).is_err() {
                            break;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("failed to read input: {}", e);
                    break;
                }
            },
            Ok(false) if events.is_closed() => break,
            Ok(false) => {}
            Err(e) => {
                warn!("failed to poll input: {}", e);
                break;
            }
        }
    });
}

pub async fn run(config: Config) -> Result<()> {
    let (events, mut inbox) = mpsc::unbounded_channel();

    let mut display = TermDisplay::new(events.clone());
    display.setup()?;

    let scheduler = TokioScheduler::new(events.clone());
    let mut game = Game::new(config, display, scheduler, StdRng::from_entropy());
    spawn_input_reader(events);

    let result = drive(&mut game, &mut inbox).await;
    if let Err(e) = &result {
        error!("game stopped: {:#}", e);
    }

    game.display_mut().restore()?;
    result
}

async fn drive<D: Display, S: Scheduler>(game: &mut Game<D, S>, inbox: &mut UnboundedReceiver<Event>) -> Result<()> {
    game.restart()?;

    loop {
        tokio::select! {
            event = inbox.recv() => match event {
                Some(Event::Command(Command::Quit)) | None => break,
                Some(event) => dispatch(game, event)?,
            },

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn dispatch<D: Display, S: Scheduler>(game: &mut Game<D, S>, event: Event) -> Result<()> {
    match event {
        Event::Command(Command::Input(input)) => game.handle_input(input)?,
        Event::Command(Command::Quit) => {}
        Event::Tick(handle) => game.on_tick(handle)?,
        Event::Timeout(handle) => game.on_timeout(handle)?,
        Event::TextShown => game.on_text_shown(),
    }

    Ok(())
}
