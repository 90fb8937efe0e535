use std::io::Write;

use log::{debug, error};

use super::{Change, Changeset, DisplaySink, DisplayState, ImageLoader};

/// Draws the grid as one `id url` row per cell
pub struct TerminalGrid<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalGrid<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write(&mut self, state: &DisplayState, changes: &Changeset) -> std::io::Result<()> {
        let (inserted, removed, moved) = changes.counts();
        writeln!(
            self.out,
            "-- {} photos (+{} -{} ~{})",
            state.len(),
            inserted,
            removed,
            moved
        )?;
        for photo in state.photos() {
            writeln!(self.out, "{}\t{}", photo.id, photo.url)?;
        }
        self.out.flush()
    }
}

impl<W: Write + Send> DisplaySink for TerminalGrid<W> {
    fn render(&mut self, state: &DisplayState, changes: &Changeset) {
        for change in changes.iter() {
            if let Change::Move { photo, from, to } = change {
                debug!("Photo {} moved from {} to {}", photo.id, from, to);
            }
        }
        if let Err(err) = self.write(state, changes) {
            error!("Could not draw results: {}", err);
        }
    }
}

/// Stands in for an image cache in the terminal, where thumbnails can't be shown
#[derive(Debug, Default)]
pub struct LogImageLoader;

impl ImageLoader for LogImageLoader {
    fn load(&mut self, url: &str) {
        debug!("Thumbnail requested for {}", url);
    }
}
