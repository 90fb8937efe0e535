use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::config::{Config, StaleResponses};
use crate::debounce::Debouncer;
use crate::models::ResultSet;
use crate::presenter::ResultsPresenter;
use crate::search::{PhotoSearch, SearchFailure, SearchQuery};

/// A search finishing, tagged with the order it was dispatched in
#[derive(Debug)]
struct SearchCompletion {
    generation: u64,
    query: SearchQuery,
    result: Result<ResultSet, SearchFailure>,
}

/// The context that owns the display. Text changes, debounce expiry and
/// search completions are all handled here one at a time; only the searches
/// themselves run elsewhere
pub struct App {
    search: Arc<dyn PhotoSearch>,
    presenter: ResultsPresenter,
    debouncer: Debouncer,
    stale_responses: StaleResponses,
    generation: u64,
    in_flight: usize,
}

impl App {
    pub fn new(search: Arc<dyn PhotoSearch>, presenter: ResultsPresenter, config: &Config) -> Self {
        Self {
            search,
            presenter,
            debouncer: Debouncer::new(config.settle_window),
            stale_responses: config.stale_responses,
            generation: 0,
            in_flight: 0,
        }
    }

    /// Runs until `text_events` closes and every dispatched search has come back.
    /// Text still waiting to settle when the input closes is searched right away
    pub async fn run(mut self, mut text_events: mpsc::Receiver<SearchQuery>) -> ResultsPresenter {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SearchCompletion>();
        let mut accepting = true;
        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                event = text_events.recv(), if accepting => match event {
                    Some(text) => {
                        self.debouncer.push(text, Instant::now());
                    }
                    None => {
                        accepting = false;
                        if let Some(query) = self.debouncer.flush() {
                            self.dispatch(query, &done_tx);
                        }
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(query) = self.debouncer.poll(Instant::now()) {
                        self.dispatch(query, &done_tx);
                    }
                },
                Some(completion) = done_rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    self.deliver(completion);
                },
                else => break,
            }
        }
        self.presenter
    }

    fn dispatch(&mut self, query: SearchQuery, done: &mpsc::UnboundedSender<SearchCompletion>) {
        self.generation += 1;
        self.in_flight += 1;
        let generation = self.generation;
        info!("Dispatching search #{} for {:?}", generation, query.to_string());
        let search = Arc::clone(&self.search);
        let done = done.clone();
        tokio::spawn(async move {
            let result = search.search(&query).await;
            // the receiver lives as long as the loop that counts in-flight searches
            let _ = done.send(SearchCompletion {
                generation,
                query,
                result,
            });
        });
    }

    fn deliver(&mut self, completion: SearchCompletion) {
        let SearchCompletion {
            generation,
            query,
            result,
        } = completion;
        let results = match result {
            Ok(results) => results,
            Err(err) => {
                error!("Search #{} for {:?} failed: {}", generation, query.to_string(), err);
                return;
            }
        };
        if self.stale_responses == StaleResponses::Drop && generation != self.generation {
            warn!(
                "Discarding results of search #{} for {:?}, search #{} is newer",
                generation,
                query.to_string(),
                self.generation
            );
            return;
        }
        self.presenter.apply(results);
    }
}
