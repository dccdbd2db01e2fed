use std::time::Duration;

use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::board::{all_positions, cross_frame, Board, Color, Position, BLACK, CELLS, FOOD_COLOUR, HEAD_COLOUR, HEIGHT, WIDTH};
use crate::config::{Config, LOSS_GLYPH_DELAY, RESTART_DELAY};
use crate::direction::{Direction, DirectionQueue};
use crate::error::GameError;
use crate::maze::MazeCatalog;
use crate::snake::{Snake, INITIAL_SIZE};

/// Random draws before giving up and scanning for free cells.
const FOOD_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Where finished frames and messages go.
pub trait Display {
    fn set_full_frame(&mut self, frame: &[Color]);

    /// Once the message is done the display must report back through
    /// `Game::on_text_shown`.
    fn show_text(&mut self, message: &str);
}

pub trait Scheduler {
    /// Arms a periodic timer. The first firing is one `period` from now.
    fn schedule(&mut self, period: Duration) -> TimerHandle;

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle;

    /// After this returns nothing carrying `handle` may be acted upon.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Stopped,
    Paused,
    Running,
}

/// Steps of the timed sequence that ends a round, after a crash or a full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossStage {
    ShowingGlyph(TimerHandle),
    ShowingScore,
    Restarting(TimerHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved { ate: bool },
    Crashed,
    /// The snake ate the last free cell.
    Won,
}

/// All of the state belonging to one round, plus the maze choice which
/// outlives rounds.
pub struct GameSession {
    pub snake: Snake,
    pub queue: DirectionQueue,
    pub last_applied: Direction,
    pub food: Position,
    pub tick_delay: Duration,
    pub state: GameState,
    pub mazes: MazeCatalog,
}

impl GameSession {
    pub fn new(maze: usize) -> Self {
        let mut mazes = MazeCatalog::new();
        mazes.select(maze);

        GameSession {
            snake: Snake::new(),
            queue: DirectionQueue::new(),
            last_applied: Direction::Stop,
            food: Position::new(0, 0),
            tick_delay: Duration::from_millis(0),
            state: GameState::Stopped,
            mazes,
        }
    }

    /// Back to a fresh round. The snake keeps its colour and the maze stays.
    pub fn reset<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Result<(), GameError> {
        let colour = self.snake.colour;
        self.snake = Snake::new();
        self.snake.colour = colour;
        self.queue.clear();
        self.last_applied = Direction::Stop;
        self.tick_delay = config.base_delay();
        self.food = self.place_food(rng)?;
        Ok(())
    }

    pub fn score(&self) -> usize {
        self.snake.size.saturating_sub(INITIAL_SIZE)
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.snake.occupies(pos) && !self.mazes.active_obstacles().contains(&pos)
    }

    pub fn place_food<R: Rng>(&self, rng: &mut R) -> Result<Position, GameError> {
        for _ in 0..FOOD_ATTEMPTS {
            let pos = Position::new(rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT));
            if self.is_free(pos) {
                return Ok(pos);
            }
        }

        let free: Vec<Position> = all_positions().filter(|p| self.is_free(*p)).collect();
        free.choose(rng).copied().ok_or(GameError::NoFreeCell)
    }

    /// Applies one tick of movement. Collisions are judged on the body after
    /// it has moved, so stepping onto the cell the tail just left is fine.
    pub fn step<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Result<TickOutcome, GameError> {
        if self.queue.peek_effective(self.last_applied) == Direction::Stop {
            return Ok(TickOutcome::Idle);
        }

        let direction = self.queue.pop_next(self.last_applied);

        let head = self.snake.prospective_move(direction);
        self.last_applied = direction;
        debug!(?direction, ?head, "tick");

        let eating = head == self.food;
        self.snake.advance(head, eating);

        if eating {
            self.snake.size += 1;
            self.tick_delay = config.next_delay(self.tick_delay);
            match self.place_food(rng) {
                Ok(food) => self.food = food,
                Err(GameError::NoFreeCell) => return Ok(TickOutcome::Won),
                Err(e) => return Err(e),
            }
            debug!(size = self.snake.size, delay_ms = self.tick_delay.as_millis() as u64, food = ?self.food, "ate");
        }

        if !head.in_bounds()
            || self.snake.collides_with_self(head)
            || self.snake.collides_with_obstacles(head, self.mazes.active_obstacles())
        {
            return Ok(TickOutcome::Crashed);
        }

        Ok(TickOutcome::Moved { ate: eating })
    }
}

/// Drives a `GameSession` from ticks, timeouts and player input, and owns the
/// only handles to the display and the scheduler.
pub struct Game<D: Display, S: Scheduler> {
    config: Config,
    session: GameSession,
    board: Board,
    display: D,
    scheduler: S,
    rng: StdRng,
    ticker: Option<TimerHandle>,
    loss: Option<LossStage>,
}

impl<D: Display, S: Scheduler> Game<D, S> {
    pub fn new(config: Config, display: D, scheduler: S, rng: StdRng) -> Self {
        let session = GameSession::new(config.maze);

        Game { config, session, board: Board::new(), display, scheduler, rng, ticker: None, loss: None }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[cfg(test)]
    pub fn state(&self) -> GameState {
        self.session.state
    }

    #[cfg(test)]
    pub fn loss_stage(&self) -> Option<LossStage> {
        self.loss
    }

    /// Starts a fresh round. Ignored unless the game is stopped and not in the
    /// middle of the crash sequence.
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.session.state != GameState::Stopped || self.loss.is_some() {
            debug!(state = ?self.session.state, "restart ignored");
            return Ok(());
        }

        self.disarm();
        self.session.reset(&self.config, &mut self.rng)?;
        self.session.state = GameState::Running;
        self.arm();

        info!(maze = self.session.mazes.active().name(), "new round");
        self.render()
    }

    pub fn pause(&mut self) {
        if self.session.state != GameState::Running {
            return;
        }

        self.disarm();
        self.session.state = GameState::Paused;
        info!("paused");
    }

    pub fn unpause(&mut self) {
        if self.session.state != GameState::Paused {
            return;
        }

        self.session.state = GameState::Running;
        self.arm();
        info!("resumed");
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), GameError> {
        if self.session.state == GameState::Stopped || self.loss.is_some() {
            return Ok(());
        }

        match event {
            InputEvent::Click if self.session.last_applied == Direction::Stop => self.switch_maze(),
            InputEvent::Click => {
                self.pause();
                self.session.snake.colour = random_colour(&mut self.rng);
                Ok(())
            }
            InputEvent::Move(direction) => {
                self.unpause();
                if !self.session.queue.push(direction, self.session.last_applied) {
                    debug!(?direction, "direction rejected");
                }
                Ok(())
            }
        }
    }

    pub fn on_tick(&mut self, handle: TimerHandle) -> Result<(), GameError> {
        if self.ticker != Some(handle) || self.session.state != GameState::Running {
            debug!(?handle, "stale tick");
            return Ok(());
        }

        match self.session.step(&self.config, &mut self.rng)? {
            TickOutcome::Idle => self.render(),
            TickOutcome::Moved { ate } => {
                if ate {
                    // Interval timers can't change period in place.
                    self.disarm();
                    self.arm();
                }
                self.render()
            }
            TickOutcome::Crashed => {
                info!(score = self.session.score(), "crashed");
                self.end_round(&cross_frame());
                Ok(())
            }
            TickOutcome::Won => {
                info!(score = self.session.score(), "board filled");
                let filled = [self.session.snake.colour; CELLS];
                self.end_round(&filled);
                Ok(())
            }
        }
    }

    pub fn on_timeout(&mut self, handle: TimerHandle) -> Result<(), GameError> {
        match self.loss {
            Some(LossStage::ShowingGlyph(h)) if h == handle => {
                let score = self.session.score();
                self.display.set_full_frame(&[BLACK; CELLS]);
                self.display.show_text(&format!(" {} {}", score, score));
                self.loss = Some(LossStage::ShowingScore);
                Ok(())
            }
            Some(LossStage::Restarting(h)) if h == handle => {
                self.loss = None;
                self.restart()
            }
            _ => {
                debug!(?handle, "stale timeout");
                Ok(())
            }
        }
    }

    pub fn on_text_shown(&mut self) {
        if self.loss == Some(LossStage::ShowingScore) {
            let timer = self.scheduler.schedule_once(RESTART_DELAY);
            self.loss = Some(LossStage::Restarting(timer));
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn arm(&mut self) {
        self.ticker = Some(self.scheduler.schedule(self.session.tick_delay));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn switch_maze(&mut self) -> Result<(), GameError> {
        self.disarm();
        self.session.state = GameState::Stopped;
        let next = (self.session.mazes.active_index() + 1) % self.session.mazes.len();
        let name = self.session.mazes.get(next)?.name();
        self.session.mazes.select(next);
        info!(maze = name, "maze switched");
        self.restart()
    }

    /// Shows `glyph`, then the score, then starts over.
    fn end_round(&mut self, glyph: &[Color]) {
        self.disarm();
        self.session.state = GameState::Stopped;

        self.display.set_full_frame(glyph);
        let timer = self.scheduler.schedule_once(LOSS_GLYPH_DELAY);
        self.loss = Some(LossStage::ShowingGlyph(timer));
    }

    fn render(&mut self) -> Result<(), GameError> {
        self.board.clear(self.session.mazes.active_frame());
        self.board.set_pixel(self.session.food, FOOD_COLOUR)?;

        for pos in self.session.snake.positions() {
            self.board.set_pixel(*pos, self.session.snake.colour)?;
        }
        self.board.set_pixel(self.session.snake.head(), HEAD_COLOUR)?;

        self.display.set_full_frame(self.board.frame());
        Ok(())
    }
}

fn random_colour<R: Rng>(rng: &mut R) -> Color {
    [rng.gen_range(40..=255), rng.gen_range(40..=255), rng.gen_range(40..=255)]
}
