use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{GameConfig, Session, SessionEvent, SessionPhase};
use crate::highscore::HighScoreStore;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::Ticker;
use crate::render::Renderer;

/// Keyboard-driven terminal game: owns the session, its tick timer and the
/// high score file
pub struct HumanMode {
    session: Session,
    store: HighScoreStore,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    ticker: Ticker,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Result<Self> {
        let high_score = store.load().unwrap_or_else(|err| {
            warn!("Ignoring unreadable high score file: {:#}", err);
            0
        });
        let session = Session::new(config, high_score).context("Invalid game configuration")?;

        Ok(Self {
            session,
            store,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ticker: Ticker::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only armed while running
                _ = self.ticker.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.stop();
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.session.offer_direction(direction);
            }
            KeyAction::Start => {
                if self.session.start() {
                    self.metrics.on_game_start();
                    self.ticker.start(self.session.move_interval());
                }
            }
            KeyAction::TogglePause => {
                if !self.session.toggle_pause() {
                    return;
                }
                if self.session.phase() == SessionPhase::Paused {
                    self.ticker.stop();
                    self.metrics.on_pause();
                } else {
                    self.metrics.on_resume();
                    self.ticker.start(self.session.move_interval());
                }
            }
            KeyAction::Restart => {
                if self.session.restart() {
                    self.metrics.on_game_start();
                    self.ticker.start(self.session.move_interval());
                }
            }
            KeyAction::Quit => self.stop(),
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        match self.session.tick() {
            Some(event) => self.on_game_over(event),
            // Eating may have sped the snake up
            None => self.ticker.set_period(self.session.move_interval()),
        }
    }

    fn on_game_over(&mut self, event: SessionEvent) {
        self.ticker.stop();
        self.metrics.on_game_over();

        if let SessionEvent::NewHighScore(score) = event {
            if let Err(err) = self.store.save(score) {
                warn!("Failed to persist high score {}: {:#}", score, err);
            }
        }
    }

    /// Tear down the tick timer and leave the loop; the render timer and
    /// event stream are dropped with it
    pub fn stop(&mut self) {
        self.ticker.stop();
        self.should_quit = true;
        info!(games_played = self.metrics.games_played, "leaving game");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};
    use tempfile::TempDir;

    fn mode(dir: &TempDir) -> HumanMode {
        let store = HighScoreStore::new(dir.path().join("best.json"));
        HumanMode::new(GameConfig::small(), store).unwrap()
    }

    fn crash_next_tick(mode: &mut HumanMode, score: u32) {
        let state = mode.session.state_mut();
        state.snake = Snake::new(Position::new(9, 5));
        state.direction = Direction::Right;
        state.food = Some(Position::new(0, 0));
        state.score = score;
    }

    #[test]
    fn test_game_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = mode(&dir);
        assert_eq!(mode.session.phase(), SessionPhase::NotStarted);
        assert_eq!(mode.session.high_score(), 0);
        assert!(!mode.ticker.is_running());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("best.json"));
        assert!(HumanMode::new(GameConfig::new(0), store).is_err());
    }

    #[test]
    fn test_loads_existing_high_score() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("best.json"));
        store.save(90).unwrap();

        let mode = HumanMode::new(GameConfig::small(), store).unwrap();
        assert_eq!(mode.session.high_score(), 90);
    }

    #[tokio::test]
    async fn test_start_and_pause_drive_ticker() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);

        mode.apply(KeyAction::Start);
        assert_eq!(mode.session.phase(), SessionPhase::Running);
        assert_eq!(mode.ticker.period(), Some(Duration::from_millis(150)));

        mode.apply(KeyAction::TogglePause);
        assert_eq!(mode.session.phase(), SessionPhase::Paused);
        assert!(!mode.ticker.is_running());

        mode.apply(KeyAction::TogglePause);
        assert_eq!(mode.session.phase(), SessionPhase::Running);
        assert!(mode.ticker.is_running());
    }

    #[tokio::test]
    async fn test_game_over_persists_new_high_score() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.apply(KeyAction::Start);
        crash_next_tick(&mut mode, 40);

        mode.update_game();

        assert_eq!(mode.session.phase(), SessionPhase::GameOver);
        assert!(!mode.ticker.is_running());
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(HighScoreStore::new(dir.path().join("best.json")).load().unwrap(), 40);
    }

    #[tokio::test]
    async fn test_restart_after_game_over() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.apply(KeyAction::Start);
        crash_next_tick(&mut mode, 0);
        mode.update_game();
        assert!(!dir.path().join("best.json").exists());

        mode.apply(KeyAction::Restart);
        assert_eq!(mode.session.phase(), SessionPhase::Running);
        assert_eq!(mode.session.snapshot().score, 0);
        assert!(mode.ticker.is_running());
    }

    #[tokio::test]
    async fn test_eating_rearms_ticker_at_faster_period() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.apply(KeyAction::Start);

        let state = mode.session.state_mut();
        state.snake = Snake::new(Position::new(4, 4));
        state.direction = Direction::Right;
        state.food = Some(Position::new(5, 4));

        mode.update_game();

        let step = GameConfig::small().speed_increase_step_ms;
        assert_eq!(mode.session.snapshot().score, 10);
        assert_eq!(mode.ticker.period(), Some(Duration::from_millis(150 - step)));
    }

    #[test]
    fn test_quit_stops_everything() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
        assert!(!mode.ticker.is_running());
    }
}
