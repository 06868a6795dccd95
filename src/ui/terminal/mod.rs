//! Line-oriented terminal front end for the main screen.
//!
//! Stands in for the platform UI: it renders state snapshots as text,
//! turns typed commands into intents and acts on view events by printing
//! what would have been launched.

mod command;
mod render;

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::platform::ACTION_SET_WALLPAPER;
use crate::shutdown::ShutdownHandle;
use crate::ui::main_screen::{MainIntent, MainViewEvent, MainViewModel};
use crate::ui::mvi::{AppViewEvent, EventCollector, ViewEventHandler};

pub use command::{parse_command, Command, CommandError, HELP};
pub use render::{describe_app_event, describe_launch, render_state, same_screen};

/// Output shared by the renderer and the event printer.
pub struct Console<W> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
        }
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Write `text`, terminated by a newline.
    pub fn print(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    pub fn with_output<T>(&self, f: impl FnOnce(&W) -> T) -> T {
        f(&self.out.lock())
    }
}

/// Prints view events in place of acting on them.
pub struct EventPrinter<W> {
    console: Console<W>,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(console: Console<W>) -> Self {
        Self { console }
    }

    fn print(&self, line: &str) {
        if let Err(err) = self.console.print(line) {
            tracing::debug!(error = %err, "Failed to print view event");
        }
    }
}

impl<W: Write> ViewEventHandler<MainViewEvent> for EventPrinter<W> {
    fn on_app_event(&mut self, event: &AppViewEvent) {
        self.print(&describe_app_event(event));
    }

    fn on_view_event(&mut self, event: &MainViewEvent) {
        let line = match event {
            MainViewEvent::App(event) => describe_app_event(event),
            MainViewEvent::StartApp(descriptor) => {
                format!("> start {}", describe_launch(descriptor))
            }
            MainViewEvent::ShowAppInfo { package_name } => {
                format!("> app info {}", package_name)
            }
            MainViewEvent::OpenWallpaperPicker => {
                format!("> start {} (wallpaper picker)", ACTION_SET_WALLPAPER)
            }
        };
        self.print(&line);
    }
}

/// Drive `view_model` from `input` until EOF, `quit` or Ctrl-C.
///
/// Submits `Init` followed by `RefreshApps` on entry, the way a screen
/// being created and then shown would. A failed write to the console ends
/// the session with an error.
pub async fn run<R, W>(
    view_model: Arc<MainViewModel>,
    input: R,
    console: Console<W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let shutdown = ShutdownHandle::new();
    // Subscribe before any intent goes in so no event is missed.
    let collector = EventCollector::new(view_model.subscribe_events());
    let events = tokio::spawn({
        let mut printer = EventPrinter::new(console.clone());
        let shutdown = shutdown.clone();
        async move { collector.run(&mut printer, shutdown).await }
    });

    let outcome = session(&view_model, input, &console).await;

    tracing::info!("Terminal session ending");
    shutdown.signal();
    view_model.shutdown();
    if let Err(err) = events.await {
        tracing::warn!(error = %err, "Event printer task failed");
    }
    outcome
}

async fn session<R, W>(
    view_model: &MainViewModel,
    input: R,
    console: &Console<W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut states = view_model.subscribe_state();
    let mut shown = states.borrow_and_update().clone();
    console
        .print(&render_state(&shown))
        .context("Failed to write to the console")?;

    view_model.emit(MainIntent::Init);
    view_model.emit(MainIntent::RefreshApps);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let keep_going = handle_line(view_model, console, &line)
                        .context("Failed to write to the console")?;
                    if !keep_going {
                        return Ok(());
                    }
                }
                Ok(None) => return Ok(()),
                Err(err) => return Err(anyhow::Error::new(err).context("Failed to read input")),
            },
            changed = states.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let next = states.borrow_and_update().clone();
                if !same_screen(&shown, &next) {
                    console
                        .print(&render_state(&next))
                        .context("Failed to write to the console")?;
                }
                shown = next;
            }
            _ = &mut ctrl_c => return Ok(()),
        }
    }
}

/// Apply one input line. Returns false when the session should end.
fn handle_line<W: Write>(
    view_model: &MainViewModel,
    console: &Console<W>,
    line: &str,
) -> io::Result<bool> {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(true),
        Err(err) => {
            console.print(&format!("error: {}\n{}", err, HELP))?;
            return Ok(true);
        }
    };

    match command {
        Command::Intent(intent) => {
            if !view_model.emit(intent) {
                console.print("busy, input dropped")?;
            }
        }
        Command::Cancel => {
            if view_model.cancel_refresh() {
                console.print("refresh cancelled")?;
            } else {
                console.print("nothing to cancel")?;
            }
        }
        Command::Show => console.print(&render_state(&view_model.state()))?,
        Command::Help => console.print(HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}
