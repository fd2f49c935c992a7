//! Snake multiplayer client
//!
//! Run with: cargo run --bin snake-client -- --url ws://127.0.0.1:8080/game_data
//! Live view: cargo run --bin snake-client --features tui
//! Last frame as PNG: cargo run --bin snake-client --features png -- --snapshot last.png
//!
//! Without the live view, input symbols (`ArrowLeft`, `KeyW`, `Escape`, ...)
//! are read one per line from stdin.
//!
//! Controls (tui):
//!   Arrows / WASD / IJKL - Turn
//!   Esc / Q - Quit

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snake_client::client::{ClientConfig, HeadlessEngine, Session, SessionInputs, Ticker};
use snake_client::codec::{Command, ProtocolVersion};
use snake_client::protocol::{Connection, ConnectionState, WsBridge};
use snake_client::renderer::{PixelCanvas, Scene};

#[derive(Parser)]
#[command(name = "snake-client")]
#[command(about = "Multiplayer snake client")]
struct Args {
    /// JSON config file (default: <config dir>/snake-client/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    url: Option<String>,

    /// Command encoding: v1 (bare direction byte) or v2 (prefixed)
    #[arg(long)]
    protocol: Option<ProtocolVersion>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Local simulation tick period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write the last frame here on exit (needs the `png` feature)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl Args {
    fn resolve(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let mut config = match self.config.clone().or_else(ClientConfig::default_path) {
            Some(path) => ClientConfig::load(&path)?,
            None => ClientConfig::default(),
        };
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if self.tick_ms.is_some() {
            config.tick_ms = self.tick_ms;
        }
        Ok(config)
    }
}

/// A session running on the runtime plus the handles the front end needs
struct Running {
    commands: mpsc::UnboundedSender<Command>,
    frames: watch::Receiver<PixelCanvas>,
    task: tokio::task::JoinHandle<ConnectionState>,
    _ticker: Option<Ticker>,
}

fn start(config: &ClientConfig) -> Result<Running, Box<dyn std::error::Error>> {
    let scene: Scene<PixelCanvas> =
        Scene::setup(config.board_width, config.board_height, config.panel_height, config.style)?;
    let (frame_tx, frames) = watch::channel(scene.surface().clone());

    info!(url = %config.url, protocol = %config.protocol, "connecting");
    let WsBridge { transport, events, handle: _ } = WsBridge::spawn(config.url.clone())?;
    let connection = Connection::new(transport, config.protocol);

    let (commands, command_rx) = mpsc::unbounded_channel();
    let (ticker, ticks) = match config.tick_period() {
        Some(period) => {
            let (ticker, ticks) = Ticker::spawn(period);
            (Some(ticker), Some(ticks))
        }
        None => (None, None),
    };

    let mut session = Session::new(connection, scene, HeadlessEngine::new())
        .on_frame(move |canvas: &PixelCanvas| {
            frame_tx.send_replace(canvas.clone());
        });
    let inputs = SessionInputs { events, commands: command_rx, ticks };
    let task = tokio::spawn(async move { session.run(inputs).await });

    Ok(Running { commands, frames, task, _ticker: ticker })
}

fn init_logging(log_file: Option<std::fs::File>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn save_snapshot(canvas: &PixelCanvas, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "png")]
    {
        canvas.to_image().save(path)?;
        info!(path = %path.display(), "snapshot written");
    }
    #[cfg(not(feature = "png"))]
    {
        let _ = canvas;
        warn!(path = %path.display(), "built without the png feature, snapshot skipped");
    }
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tokio::io::AsyncBufReadExt;
    use snake_client::client::map_input;

    init_logging(None);
    let args = Args::parse();
    let config = args.resolve()?;

    let rt = tokio::runtime::Runtime::new()?;
    let state = rt.block_on(async {
        let mut running = start(&config)?;

        let commands = running.commands.clone();
        tokio::spawn(async move {
            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                match map_input(line.trim()) {
                    Some(command) => {
                        if commands.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!(symbol = line.trim(), "unmapped input"),
                }
            }
        });

        let state = (&mut running.task).await?;
        let last = running.frames.borrow().clone();
        Ok::<_, Box<dyn std::error::Error>>((state, last))
    });
    rt.shutdown_timeout(Duration::from_millis(100));

    let (state, last) = state?;
    info!(?state, "disconnected");
    if let Some(path) = &args.snapshot {
        save_snapshot(&last, path)?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tui_main::run()
}

#[cfg(feature = "tui")]
mod tui_main {
    use std::io::stdout;

    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::{
        prelude::*,
        widgets::Paragraph,
    };
    use tracing::info;

    use snake_client::client::map_input;
    use snake_client::codec::Command;
    use snake_client::renderer::CanvasView;

    use super::{init_logging, save_snapshot, start, Args, Duration};
    use clap::Parser;

    const FRAME_RATE: Duration = Duration::from_millis(16);

    /// Terminal key to the input symbol it stands for
    fn key_symbol(code: KeyCode) -> Option<&'static str> {
        match code {
            KeyCode::Left => Some("ArrowLeft"),
            KeyCode::Up => Some("ArrowUp"),
            KeyCode::Right => Some("ArrowRight"),
            KeyCode::Down => Some("ArrowDown"),
            KeyCode::Esc => Some("Escape"),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'a' => Some("KeyA"),
                'w' => Some("KeyW"),
                'd' => Some("KeyD"),
                's' => Some("KeyS"),
                'j' => Some("KeyJ"),
                'i' => Some("KeyI"),
                'l' => Some("KeyL"),
                'k' => Some("KeyK"),
                'q' => Some("KeyQ"),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        init_logging(Some(std::fs::File::create("snake-client.log")?));
        let args = Args::parse();
        let config = args.resolve()?;

        let rt = tokio::runtime::Runtime::new()?;
        let mut running = rt.block_on(async { start(&config) })?;

        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        let status = format!(" {} ({})  arrows/wasd to turn, esc to quit", config.url, config.protocol);
        loop {
            let canvas = running.frames.borrow().clone();
            terminal.draw(|frame| {
                let [view, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                    .areas(frame.area());
                frame.render_widget(CanvasView::new(&canvas), view);
                frame.render_widget(Paragraph::new(status.as_str()), footer);
            })?;

            if running.task.is_finished() {
                break;
            }

            if event::poll(FRAME_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(command) = key_symbol(key.code).and_then(map_input) {
                            let quit = command == Command::Quit;
                            let _ = running.commands.send(command);
                            if quit {
                                break;
                            }
                        }
                    }
                }
            }
        }

        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;

        // give the server a moment to close after a quit request
        let state = rt.block_on(async {
            tokio::time::timeout(Duration::from_secs(1), &mut running.task).await
        });
        match state {
            Ok(Ok(state)) => info!(?state, "disconnected"),
            _ => info!("left before the server closed the connection"),
        }
        let last = running.frames.borrow().clone();
        rt.shutdown_timeout(Duration::from_millis(100));

        if let Some(path) = &args.snapshot {
            save_snapshot(&last, path)?;
        }
        Ok(())
    }
}
