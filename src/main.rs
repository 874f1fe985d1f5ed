use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType},
};
use std::io::{stdout, BufWriter, Stdout};
use std::time::{Duration, Instant};

use noisetty::cli::Args;
use noisetty::frame::Frame;
use noisetty::palette::Palette;
use noisetty::params::Params;
use noisetty::snapshot;
use noisetty::terminal::{key_action, KeyAction, Presenter};
use noisetty::{FieldSampler, NoiseGenerator};

struct NoiseTTY {
    sampler: FieldSampler,
    palette: Palette,
    presenter: Presenter<BufWriter<Stdout>>,
    frame_interval: Duration,
    paused: bool,
}

impl NoiseTTY {
    fn new(params: &Params, terminal_size: Option<(u16, u16)>) -> Self {
        let sampler = FieldSampler::new(params.grid(), NoiseGenerator::new(), params.step)
            .with_mode(params.depth_mode);

        let mut presenter = Presenter::new(BufWriter::new(stdout()));
        if let Some((cols, rows)) = terminal_size {
            presenter = presenter.with_viewport(cols as usize, rows as usize);
        }

        Self {
            sampler,
            palette: params.palette,
            presenter,
            frame_interval: params.frame_interval(),
            paused: false,
        }
    }

    fn handle_input(&mut self) -> Result<bool> {
        use crossterm::event::{self, Event};

        // Drain everything queued since the last frame without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match key_action(&key) {
                    KeyAction::Quit => return Ok(false),
                    KeyAction::TogglePause => {
                        self.paused = !self.paused;
                        log::debug!("paused: {}", self.paused);
                    }
                    KeyAction::Ignore => {}
                }
            }
        }
        Ok(true)
    }

    fn render(&mut self) -> Result<()> {
        let start = Instant::now();
        let values = self.sampler.advance();
        let grid = self.sampler.grid();
        let frame = Frame::from_values(grid.width, grid.height, &values, &self.palette);
        self.presenter.present(&frame)?;
        log::trace!(
            "frame {} at z={:.4} in {:?}",
            self.sampler.frames(),
            self.sampler.depth(),
            start.elapsed()
        );
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let result = loop {
            let frame_start = Instant::now();

            // Handle input first for better responsiveness
            match self.handle_input() {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }

            if !self.paused {
                if let Err(e) = self.render() {
                    break Err(e);
                }
            }

            if let Some(rest) = self.frame_interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        };

        execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;

        log::info!("stopped after {} frames", self.sampler.frames());
        result
    }
}

fn take_snapshot(params: &Params, frames: u32, path: &std::path::Path) -> Result<()> {
    let mut sampler = FieldSampler::new(params.grid(), NoiseGenerator::new(), params.step)
        .with_mode(params.depth_mode);

    let mut values = Vec::new();
    for _ in 0..frames.max(1) {
        values = sampler.advance();
    }
    log::info!("sampled {} frames, z={}", sampler.frames(), sampler.depth());

    let frame = Frame::from_values(params.width, params.height, &values, &params.palette);
    snapshot::save_png(&frame, params.cell_size, path)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let terminal_size = terminal::size().ok();
    let params = args.to_params(terminal_size);
    params.validate()?;
    log::info!(
        "grid {}x{} at frequency {}, step {} ({:?})",
        params.width,
        params.height,
        params.frequency,
        params.step,
        params.depth_mode
    );

    if let Some(path) = &args.snapshot {
        return take_snapshot(&params, args.frames, path);
    }

    let mut app = NoiseTTY::new(&params, terminal_size);
    app.run()
}
