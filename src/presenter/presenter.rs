use itertools::Itertools;
use log::{info, warn};

use crate::models::{Photo, ResultSet};

use super::{diff, Changeset};

/// Whatever currently draws the grid
pub trait DisplaySink: Send {
    fn render(&mut self, state: &DisplayState, changes: &Changeset);
}

/// Fetches and caches the image behind a cell. Only ever handed a url
pub trait ImageLoader: Send {
    fn load(&mut self, url: &str);
}

/// Photos currently on screen, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    photos: Vec<Photo>,
}

impl DisplayState {
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Owns what is displayed. Must only be driven from the context that owns the
/// display, it does no synchronization of its own
pub struct ResultsPresenter {
    state: DisplayState,
    sink: Box<dyn DisplaySink>,
    loader: Box<dyn ImageLoader>,
}

impl ResultsPresenter {
    pub fn new(sink: Box<dyn DisplaySink>, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            state: DisplayState::default(),
            sink,
            loader,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Replaces everything on screen with `results` and pushes the difference
    /// to the sink. Nothing is animated
    pub fn apply(&mut self, results: ResultSet) -> Changeset {
        let received = results.len();
        let photos = results.into_iter().unique_by(|photo| photo.id).collect::<Vec<_>>();
        if photos.len() != received {
            warn!(
                "Dropped {} photos with an id that was already in the results",
                received - photos.len()
            );
        }

        let changes = diff(&self.state.photos, &photos);
        self.state = DisplayState { photos };
        let (inserted, removed, moved) = changes.counts();
        info!(
            "Showing {} photos ({} new, {} gone, {} moved)",
            self.state.len(),
            inserted,
            removed,
            moved
        );
        self.sink.render(&self.state, &changes);
        for photo in changes.inserted() {
            self.loader.load(&photo.url);
        }
        changes
    }
}
