use anyhow::{anyhow, Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wastewater_map::aggregation::Aggregation;
use wastewater_map::app::App;
use wastewater_map::config::{AppConfig, CONFIG_FILE};
use wastewater_map::data;
use wastewater_map::journal::FileJournal;
use wastewater_map::map::{MapView, RegionGeometry};
use wastewater_map::ui;

fn main() {
    if let Err(e) = start() {
        eprintln!("An error occurred: {e:#}");
        std::process::exit(1);
    }
}

fn start() -> Result<()> {
    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE))?;
    init_tracing(&config.output.diagnostics_log)?;
    let app = build_app(&config)?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture for tooltips
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, app);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Diagnostics go to a file; the terminal belongs to the UI
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open diagnostics log: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

fn build_app(config: &AppConfig) -> Result<App> {
    let sites = data::load_sites(&config.input.plants)?;
    let sites = data::choose_sites(sites, config.terminals.count, &mut rand::rng());
    info!(
        plants = ?sites.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "entry forms opened"
    );

    // Fall back to the built-in outline if the configured geometry is unusable
    let geometry = match &config.input.geometry {
        Some(path) => data::load_region_geometry(path).unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "using built-in region geometry");
            RegionGeometry::builtin()
        }),
        None => RegionGeometry::builtin(),
    };

    let map = MapView::new(&config.map, geometry);
    let aggregation = Aggregation::new(Box::new(FileJournal::new(&config.output.measurement_log)));
    Ok(App::new(map, aggregation, sites, config.terminals.cooldown()))
}

/// Keyboard input goes to the focused entry form
fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Switch plant
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),

        // Field selection and editing
        KeyCode::Up => {
            if let Some(form) = app.focused_form_mut() {
                form.select_prev();
            }
        }
        KeyCode::Down => {
            if let Some(form) = app.focused_form_mut() {
                form.select_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.focused_form_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(form) = app.focused_form_mut() {
                form.push_char(ch);
            }
        }

        KeyCode::Enter => {
            // Rejections are shown in the form and status bar
            let _ = app.submit_focused(now);
        }

        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => app.hover(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    // Main loop
    loop {
        let now = Instant::now();
        app.tick(now);

        if app.take_redraw() {
            terminal.draw(|frame| ui::render(frame, &app, now))?;
        }

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        handle_key(&mut app, key, Instant::now());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => app.request_redraw(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
