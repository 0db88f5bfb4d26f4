#![forbid(unsafe_code)]

//! Datefield demo binary.
//!
//! Run with `cargo run -p datefield-demo -- --help` for options.

use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use datefield::{Event, Frame, SessionOptions, TerminalSession};
use datefield_core::logging;
use datefield_demo::app::DemoApp;
use datefield_demo::cli::Opts;
use datefield_demo::presenter::Presenter;

/// How long to wait for input before redrawing anyway.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let opts = Opts::parse();
    if let Err(message) = opts.validate() {
        eprintln!("error: {message}");
        return ExitCode::from(2);
    }
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> datefield::Result<()> {
    if let Some(path) = &opts.log_file {
        let file = File::create(path)?;
        logging::init(Mutex::new(file), logging::DEFAULT_FILTER);
    }

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: !opts.no_mouse,
        bracketed_paste: true,
    })?;
    let (width, height) = session.size()?;
    tracing::info!(width, height, "demo started");

    let mut app = DemoApp::new(opts);
    let mut frame = Frame::with_hit_grid(width, height);
    let mut presenter = Presenter::new(io::stdout());

    while !app.should_quit() {
        frame.clear();
        app.render(&mut frame);
        presenter.present(&frame)?;

        if !session.poll_event(POLL_INTERVAL)? {
            continue;
        }
        let Some(event) = session.read_event()? else {
            continue;
        };
        if let Event::Resize { width, height } = event {
            frame = Frame::with_hit_grid(width, height);
            presenter.invalidate();
            continue;
        }
        app.handle_event(&event, &frame);
    }

    tracing::info!("demo finished");
    Ok(())
}
