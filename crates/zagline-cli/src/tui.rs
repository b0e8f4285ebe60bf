//! Terminal UI: parameter panel on the left, raster mirror on the right.
//!
//! Generation is cheap and runs inline on every change. Rasterizing the
//! preview is not, so it runs on a worker thread; if parameters change while
//! a raster is in flight, one more raster is requested when it lands and only
//! the latest image is shown.

use std::io::{self, stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use image::DynamicImage;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use ratatui_image::{picker::{Picker, ProtocolType}, protocol::StatefulProtocol, StatefulImage};

use zagline::params::{CHAOS_RANGE, LINES_RANGE, SEGMENTS_RANGE, STROKE_WIDTH_RANGE, VPADDING_RANGE};
use zagline::{
    generate_pattern, Exporter, FileExporter, Parameters, Pattern, SimplexNoise, DEFAULT_EXPORT_NAME,
};

use crate::cli::common::ResolvedPattern;
use crate::raster::{pixmap_to_image, rasterize_data_uri, svg_data_uri, RASTER_SIZE};

/// Stroke colors the panel cycles through.
const PALETTE: &[&str] = &[
    "black", "#4169e1", "#E63946", "#2A9D8F", "#264653", "#F4A261", "#8338EC", "#FF006E",
];

/// Step for the fractional parameters, matching the panel's 0.05 increments.
const FINE_STEP: f64 = 0.05;

/// One adjustable row of the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Lines,
    Segments,
    StrokeWidth,
    StrokeColor,
    ChaosX,
    ChaosY,
    VPadding,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Lines,
        Field::Segments,
        Field::StrokeWidth,
        Field::StrokeColor,
        Field::ChaosX,
        Field::ChaosY,
        Field::VPadding,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Lines => "Line Count",
            Field::Segments => "Segments",
            Field::StrokeWidth => "Stroke width",
            Field::StrokeColor => "Stroke",
            Field::ChaosX => "X noise",
            Field::ChaosY => "Y noise",
            Field::VPadding => "VPadding",
        }
    }

    pub fn value(self, params: &Parameters) -> String {
        match self {
            Field::Lines => params.num_lines.to_string(),
            Field::Segments => params.num_segments.to_string(),
            Field::StrokeWidth => format!("{:.2}", params.stroke_width),
            Field::StrokeColor => params.line_color.clone(),
            Field::ChaosX => format!("{:.2}", params.chaos_x),
            Field::ChaosY => format!("{:.2}", params.chaos_y),
            Field::VPadding => format!("{:.2}", params.vpadding),
        }
    }

    /// Move this field `steps` increments, clamped to its valid range.
    pub fn adjust(self, params: &mut Parameters, steps: i32) {
        match self {
            Field::Lines => params.num_lines = step_int(params.num_lines, steps, &LINES_RANGE),
            Field::Segments => params.num_segments = step_int(params.num_segments, steps, &SEGMENTS_RANGE),
            Field::StrokeWidth => params.stroke_width = step_real(params.stroke_width, steps, &STROKE_WIDTH_RANGE),
            Field::StrokeColor => params.line_color = cycle_color(&params.line_color, steps),
            Field::ChaosX => params.chaos_x = step_real(params.chaos_x, steps, &CHAOS_RANGE),
            Field::ChaosY => params.chaos_y = step_real(params.chaos_y, steps, &CHAOS_RANGE),
            Field::VPadding => params.vpadding = step_real(params.vpadding, steps, &VPADDING_RANGE),
        }
    }
}

fn step_int(value: u32, steps: i32, range: &std::ops::RangeInclusive<u32>) -> u32 {
    let next = value as i64 + steps as i64;
    next.clamp(*range.start() as i64, *range.end() as i64) as u32
}

fn step_real(value: f64, steps: i32, range: &std::ops::RangeInclusive<f64>) -> f64 {
    let next = value + steps as f64 * FINE_STEP;
    // Snap to hundredths so repeated steps don't accumulate 0.05 rounding error
    let snapped = (next * 100.0).round() / 100.0;
    snapped.clamp(*range.start(), *range.end())
}

fn cycle_color(current: &str, steps: i32) -> String {
    let len = PALETTE.len() as i32;
    let next = match PALETTE.iter().position(|c| c.eq_ignore_ascii_case(current)) {
        Some(i) => (i as i32 + steps).rem_euclid(len),
        None if steps >= 0 => 0,
        None => len - 1,
    };
    PALETTE[next as usize].to_string()
}

/// Result from background rasterization
struct RasterResult {
    image: Result<DynamicImage, String>,
    raster_time_ms: f64,
}

/// Application state for TUI
struct App {
    params: Parameters,
    /// Constructed once; never reseeded while the UI runs
    noise: SimplexNoise,
    pattern: Pattern,
    field_state: ListState,
    gen_time_ms: f64,
    raster_time_ms: f64,
    should_quit: bool,
    /// Is a raster in progress?
    is_rasterizing: bool,
    /// Rasterize again after the current one completes
    needs_raster: bool,
    result_rx: Receiver<RasterResult>,
    result_tx: Sender<RasterResult>,
    spinner_frame: usize,
    picker: Picker,
    image_state: Option<Box<dyn StatefulProtocol>>,
    exporter: FileExporter,
    /// Last export / raster message shown in the stats panel
    status: String,
}

impl App {
    fn new(resolved: ResolvedPattern) -> Self {
        let (result_tx, result_rx) = mpsc::channel();

        // Initialize image picker - force Sixel protocol
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        let mut field_state = ListState::default();
        field_state.select(Some(0));

        let noise = SimplexNoise::new(resolved.seed);
        let pattern = generate_pattern(&resolved.params, &noise);

        let mut app = App {
            params: resolved.params,
            noise,
            pattern,
            field_state,
            gen_time_ms: 0.0,
            raster_time_ms: 0.0,
            should_quit: false,
            is_rasterizing: false,
            needs_raster: false,
            result_rx,
            result_tx,
            spinner_frame: 0,
            picker,
            image_state: None,
            exporter: FileExporter::new("."),
            status: String::new(),
        };

        app.regenerate();
        app
    }

    fn selected_field(&self) -> Field {
        Field::ALL[self.field_state.selected().unwrap_or(0)]
    }

    fn regenerate(&mut self) {
        let start = Instant::now();
        self.pattern = generate_pattern(&self.params, &self.noise);
        self.gen_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.request_raster();
    }

    fn request_raster(&mut self) {
        // Skip if already rasterizing - mark for another pass after completion
        if self.is_rasterizing {
            self.needs_raster = true;
            return;
        }

        self.needs_raster = false;
        self.is_rasterizing = true;

        let uri = svg_data_uri(&self.pattern, RASTER_SIZE);
        let tx = self.result_tx.clone();

        thread::spawn(move || {
            let start = Instant::now();
            let image = rasterize_data_uri(&uri, RASTER_SIZE, Some(tiny_skia::Color::WHITE))
                .and_then(pixmap_to_image)
                .map_err(|e| format!("{:#}", e));
            let raster_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let _ = tx.send(RasterResult { image, raster_time_ms });
        });
    }

    fn check_raster_result(&mut self) {
        // Drain all pending results, keep only the latest
        let mut latest: Option<RasterResult> = None;
        while let Ok(result) = self.result_rx.try_recv() {
            latest = Some(result);
        }

        if let Some(result) = latest {
            self.is_rasterizing = false;
            self.raster_time_ms = result.raster_time_ms;

            match result.image {
                Ok(img) => self.image_state = Some(self.picker.new_resize_protocol(img)),
                Err(e) => {
                    self.image_state = None;
                    self.status = format!("Raster failed: {}", e);
                }
            }

            if self.needs_raster {
                self.request_raster();
            }
        }
    }

    fn next_field(&mut self) {
        let i = match self.field_state.selected() {
            Some(i) => (i + 1) % Field::ALL.len(),
            None => 0,
        };
        self.field_state.select(Some(i));
    }

    fn prev_field(&mut self) {
        let i = match self.field_state.selected() {
            Some(0) | None => Field::ALL.len() - 1,
            Some(i) => i - 1,
        };
        self.field_state.select(Some(i));
    }

    fn adjust(&mut self, steps: i32) {
        let before = self.params.clone();
        self.selected_field().adjust(&mut self.params, steps);
        if self.params != before {
            self.regenerate();
        }
    }

    fn export(&mut self) {
        self.status = match self.exporter.export(&self.pattern, DEFAULT_EXPORT_NAME) {
            Ok(()) => match self.exporter.last_written() {
                Some(path) => format!("Exported {}", path.display()),
                None => "Exported".to_string(),
            },
            Err(e) => format!("Export failed: {}", e),
        };
    }
}

/// Run the TUI until the user quits.
pub fn run_tui(resolved: ResolvedPattern) -> Result<()> {
    // Initialize terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(resolved);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Pick up finished rasters (non-blocking)
        app.check_raster_result();

        // Animate spinner while rasterizing
        if app.is_rasterizing {
            app.spinner_frame = (app.spinner_frame + 1) % 8;
        }

        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Up | KeyCode::Char('k') => app.prev_field(),
                        KeyCode::Down | KeyCode::Char('j') => app.next_field(),
                        KeyCode::Left | KeyCode::Char('h') => app.adjust(-1),
                        KeyCode::Right | KeyCode::Char('l') => app.adjust(1),
                        KeyCode::Char('[') => app.adjust(-5),
                        KeyCode::Char(']') => app.adjust(5),
                        KeyCode::Char('e') => app.export(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30),
            Constraint::Min(40),
        ])
        .split(main_layout[0]);

    // Split left sidebar into parameter panel and stats
    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Field::ALL.len() as u16 + 2),
            Constraint::Min(7),
        ])
        .split(top_layout[0]);

    // Parameter panel
    let items: Vec<ListItem> = Field::ALL
        .iter()
        .map(|f| ListItem::new(format!("{:<13}{:>11}", f.label(), f.value(&app.params))))
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Parameters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, sidebar_layout[0], &mut app.field_state.clone());

    // Stats panel
    let stats_text = format!(
        "Lines: {}\nSegments: {}\nGen: {:.2}ms\nRaster: {:.1}ms\nSeed: {}\n{}",
        app.pattern.lines.len(),
        app.pattern.segment_count(),
        app.gen_time_ms,
        app.raster_time_ms,
        app.noise.seed(),
        app.status,
    );
    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));

    frame.render_widget(stats, sidebar_layout[1]);

    // Spinner animation frames
    let spinner_chars = ['|', '/', '-', '\\', '|', '/', '-', '\\'];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let image_title = if app.is_rasterizing {
        format!(" [{}] Rasterizing... ", spinner)
    } else {
        format!(" PNG {}x{} ", RASTER_SIZE, RASTER_SIZE)
    };

    let border_color = if app.is_rasterizing { Color::Yellow } else { Color::Green };

    let image_block = Block::default()
        .title(image_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(top_layout[1]);
    frame.render_widget(image_block, top_layout[1]);

    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }

    // Help
    let help = Paragraph::new("↑↓ select  ←→ adjust  [ ] adjust x5\ne export pattern.svg  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, main_layout[1]);
}
