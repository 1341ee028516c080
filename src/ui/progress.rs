//! Progress indicator for long-running wipe operations

use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const RENDER_INTERVAL: Duration = Duration::from_millis(100);
const BAR_WIDTH: usize = 30;

/// A counter with an animated `[=====>    ] 12/40` line on the terminal
///
/// Rendering happens on a background task and only when stdout is a
/// terminal. The line is cleared when the progress is finished or dropped.
///
/// # Example
///
/// ```rust,ignore
/// let progress = Progress::start("deleting messages", messages.len());
/// for message in &messages {
///     delete(message).await;
///     progress.inc();
/// }
/// progress.finish();
/// ```
pub struct Progress {
    state: Arc<ProgressState>,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

struct ProgressState {
    message: String,
    total: usize,
    done: AtomicUsize,
}

impl Progress {
    /// Start a progress line; must be called inside a tokio runtime
    pub fn start(message: impl Into<String>, total: usize) -> Self {
        let state = Arc::new(ProgressState {
            message: message.into(),
            total,
            done: AtomicUsize::new(0),
        });

        if !io::stdout().is_terminal() {
            return Self { state, stop_tx: None, handle: None };
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(Self::run(Arc::clone(&state), stop_rx));

        Self {
            state,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// A counter that never renders
    pub fn hidden(total: usize) -> Self {
        Self {
            state: Arc::new(ProgressState {
                message: String::new(),
                total,
                done: AtomicUsize::new(0),
            }),
            stop_tx: None,
            handle: None,
        }
    }

    pub fn inc(&self) {
        self.state.done.fetch_add(1, Ordering::Relaxed);
    }

    pub fn position(&self) -> usize {
        self.state.done.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.state.total
    }

    /// Stop rendering and clear the line
    pub fn finish(mut self) {
        self.stop_internal();
    }

    fn stop_internal(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            // Can't await in Drop
            handle.abort();
            clear_line();
        }
    }

    async fn run(state: Arc<ProgressState>, mut stop_rx: oneshot::Receiver<()>) {
        let mut frame = 0;
        let mut stdout = io::stdout();

        loop {
            let spinner_char = SPINNER_CHARS[frame % SPINNER_CHARS.len()];
            let done = state.done.load(Ordering::Relaxed);
            print!(
                "\r{} {} {}",
                spinner_char,
                state.message,
                render_bar(done, state.total, BAR_WIDTH)
            );
            let _ = stdout.flush();

            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(RENDER_INTERVAL) => {},
                _ = &mut stop_rx => break,
            }
        }

        clear_line();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.stop_internal();
    }
}

/// Render `[====>     ] done/total`
pub fn render_bar(done: usize, total: usize, width: usize) -> String {
    let done = done.min(total);
    let filled = if total == 0 { width } else { done * width / total };

    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(match i.cmp(&filled) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => '>',
            std::cmp::Ordering::Greater => ' ',
        });
    }
    bar.push(']');
    format!("{} {}/{}", bar, done, total)
}

fn clear_line() {
    print!("\r\x1b[K");
    let _ = io::stdout().flush();
}
