use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    config::{self, PhysicsConfig, Profile, Summation, Timestep},
    core::PhysicsStep,
    render,
    store::BodyStore,
    types::ColorId,
};

/// Everything the launcher decides before the first frame.
#[derive(Clone, Copy, Debug)]
pub struct RunSettings {
    pub profile: Profile,
    pub count: usize,
    pub seed: u64,
    pub fixed_dt: Option<f32>,
    pub summation: Option<Summation>,
    pub strict_mass: bool,
}

impl RunSettings {
    pub fn physics(&self) -> PhysicsConfig {
        let mut physics = self.profile.physics();
        if let Some(summation) = self.summation {
            physics.summation = summation;
        }
        if self.strict_mass {
            physics.mass_policy = config::MassPolicy::RejectNonPositive;
        }
        physics
    }

    pub fn timestep(&self) -> Timestep {
        match self.fixed_dt {
            Some(dt) => Timestep::Fixed(dt),
            None => self.profile.timestep(),
        }
    }

    pub fn build_store(&self, seed: u64) -> BodyStore {
        match self.profile {
            Profile::Binary => BodyStore::two_body(self.physics().trail_capacity),
            Profile::Swarm => BodyStore::random(&self.profile.spawn(self.count), seed),
        }
    }
}

pub fn run(settings: RunSettings) -> Result<()> {
    let physics = settings.physics();
    let timestep = settings.timestep();
    let mut seed = settings.seed;
    let mut store = settings.build_store(seed);
    store.validate(physics.mass_policy)?;
    log::info!(
        "starting {:?} profile: {} bodies, {:?} summation, {:?}",
        settings.profile,
        store.len(),
        physics.summation,
        timestep
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, settings, physics, timestep, &mut store, &mut seed);
    shutdown_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: RunSettings,
    physics: PhysicsConfig,
    timestep: Timestep,
    store: &mut BodyStore,
    seed: &mut u64,
) -> Result<()> {
    let mut step = PhysicsStep::new();
    let mut ui_state = UiState::new();
    let frame_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut last_frame = Instant::now();
    let mut frame_counter = 0_u32;
    let mut last_fps_sample = Instant::now();
    let mut fps = 0.0_f32;

    loop {
        while event::poll(Duration::from_millis(0))? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        log::info!("exit requested after {} frames", ui_state.frames);
                        return Ok(());
                    }
                    KeyCode::Char(' ') => {
                        ui_state.paused = !ui_state.paused;
                    }
                    KeyCode::Char('r') => {
                        if settings.profile == Profile::Swarm {
                            *seed = seed.wrapping_add(1);
                        }
                        *store = settings.build_store(*seed);
                        ui_state.frames = 0;
                        log::info!("reset with seed {}", seed);
                    }
                    _ => {}
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < frame_interval {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }
        last_frame = Instant::now();

        let dt = match timestep {
            Timestep::Fixed(dt) => dt,
            Timestep::Measured => elapsed.as_secs_f32(),
        };
        if !ui_state.paused {
            step.update(store, dt, &physics);
            ui_state.frames += 1;
        }

        frame_counter += 1;
        if last_fps_sample.elapsed() >= Duration::from_secs(1) {
            fps = frame_counter as f32 / last_fps_sample.elapsed().as_secs_f32();
            frame_counter = 0;
            last_fps_sample = Instant::now();
        }

        let stats = store.stats();
        terminal.draw(|frame| {
            let size = frame.size();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(3),
                    Constraint::Length(3),
                ])
                .split(size);

            let header = Paragraph::new(format!(
                "bodies: {} | mass: {:.0} | KE: {:.1} | p: ({:.1}, {:.1}) | com: ({:.0}, {:.0}) | dt: {:.3} | frame: {} | fps: {:.1}{}",
                stats.body_count,
                stats.total_mass,
                stats.kinetic_energy,
                stats.momentum.x,
                stats.momentum.y,
                stats.center_of_mass.x,
                stats.center_of_mass.y,
                dt,
                ui_state.frames,
                fps,
                if ui_state.paused { " | paused" } else { "" }
            ))
            .block(Block::default().borders(Borders::ALL).title("gravsim"));
            frame.render_widget(header, chunks[0]);

            let inner_width = chunks[1].width.saturating_sub(2);
            let inner_height = chunks[1].height.saturating_sub(2);
            let viewport = render::Viewport {
                width: inner_width,
                height: inner_height,
            };
            let camera = render::Camera::fit(config::WORLD_WIDTH, config::WORLD_HEIGHT, viewport);
            render::draw(store, &camera, viewport, &mut ui_state.framebuf);

            let framebuf = &ui_state.framebuf;
            let lines: Vec<Line> = (0..framebuf.height())
                .map(|y| {
                    let spans: Vec<Span> = (0..framebuf.width())
                        .map(|x| {
                            let cell = framebuf.get(x, y);
                            Span::styled(
                                cell.ch.to_string(),
                                Style::default().fg(color_for(cell.color)),
                            )
                        })
                        .collect();
                    Line::from(spans)
                })
                .collect();

            let world = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{:?}", settings.profile)),
            );
            frame.render_widget(world, chunks[1]);

            let footer = Paragraph::new("space: pause | r: reset | q: quit")
                .block(Block::default().borders(Borders::ALL).title("Controls"));
            frame.render_widget(footer, chunks[2]);
        })?;
    }
}

fn shutdown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    framebuf: render::FrameBuffer,
    paused: bool,
    frames: u64,
}

impl UiState {
    fn new() -> Self {
        Self {
            framebuf: render::FrameBuffer::new(0, 0),
            paused: false,
            frames: 0,
        }
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Cyan => Color::Cyan,
        ColorId::Blue => Color::Blue,
        ColorId::Yellow => Color::Yellow,
        ColorId::Magenta => Color::Magenta,
        ColorId::Red => Color::Red,
        ColorId::Green => Color::Green,
        ColorId::Trail => Color::DarkGray,
    }
}
