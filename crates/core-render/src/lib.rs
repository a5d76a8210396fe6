//! Screen rendering: scroll the view, compose one frame into a byte buffer,
//! hand it to the terminal in a single write.
//!
//! Exposed components:
//! - `viewport`: minimal-movement scroll model for row and column offsets.
//! - `compose`: full-frame composition (rows, gutter, highlight colours,
//!   selection and search overlays, status bar, message line, cursor).
//! - `status`: status bar segments and layout.
//! - `writer`: per-frame output buffer built on crossterm commands, plus the
//!   raw `SetSgr` colour command.

use anyhow::Result;
use core_state::EditorState;
use core_terminal::TerminalIo;
use std::time::Instant;

pub mod compose;
pub mod status;
pub mod viewport;
pub mod writer;

pub use compose::compose_frame;
pub use viewport::scroll;
pub use writer::{FrameStats, FrameWriter, SetSgr};

/// Scroll, compose and flush one frame with exactly one `write_bytes` call.
pub fn render<T: TerminalIo + ?Sized>(state: &mut EditorState, term: &mut T) -> Result<FrameStats> {
    let started = Instant::now();
    scroll(state);
    let (bytes, stats) = compose_frame(state, started);
    term.write_bytes(&bytes)?;
    tracing::trace!(
        target: "render.frame",
        bytes = stats.bytes,
        rows = stats.rows_drawn,
        colour_changes = stats.colour_changes,
        elapsed_us = started.elapsed().as_micros() as u64,
        "frame"
    );
    Ok(stats)
}
