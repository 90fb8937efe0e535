use std::time::Duration;

use log::debug;
use tokio::time::Instant;

use crate::search::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Pending { text: SearchQuery, deadline: Instant },
}

/// What happened to a text event handed to [Debouncer::push]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The window was (re)started and will expire at this instant
    Scheduled(Instant),
    /// Same text as the one already waiting, the window keeps running
    Duplicate,
    /// The text went back to what was last settled, so nothing is waiting anymore
    Reverted,
}

/// Coalesces rapid edits of the search text into settled queries.
///
/// The debouncer never looks at a clock itself: the caller passes the current
/// instant in and waits for [Debouncer::deadline] however it likes.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    state: State,
    /// Text that most recently made it through a full window, empty or not
    last_settled: Option<SearchQuery>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: State::Idle,
            last_settled: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            State::Idle => None,
            State::Pending { deadline, .. } => Some(*deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state != State::Idle
    }

    pub fn push(&mut self, text: SearchQuery, now: Instant) -> Input {
        if let State::Pending { text: pending, .. } = &self.state {
            if *pending == text {
                debug!("Ignoring repeated search text {:?}", text.to_string());
                return Input::Duplicate;
            }
        }
        if self.last_settled.as_ref() == Some(&text) {
            if self.is_pending() {
                debug!("Search text reverted to {:?}, cancelling", text.to_string());
                self.state = State::Idle;
                return Input::Reverted;
            }
            debug!("Ignoring repeated search text {:?}", text.to_string());
            return Input::Duplicate;
        }
        let deadline = now + self.window;
        debug!("Waiting for {:?} to settle", text.to_string());
        self.state = State::Pending { text, deadline };
        Input::Scheduled(deadline)
    }

    /// Settles the pending text if its window is over. Returns the query to
    /// search, which is never empty
    pub fn poll(&mut self, now: Instant) -> Option<SearchQuery> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Settles whatever is pending right away, without waiting for the window
    pub fn flush(&mut self) -> Option<SearchQuery> {
        let text = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => return None,
            State::Pending { text, .. } => text,
        };
        self.last_settled = Some(text.clone());
        if text.is_empty() {
            debug!("Search text settled empty, nothing to search");
            return None;
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(1);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn q(text: &str) -> SearchQuery {
        SearchQuery::from(text)
    }

    #[test]
    fn rapid_edits_settle_on_the_last_one() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        for (i, text) in ["p", "pa", "par", "paris"].iter().enumerate() {
            let now = start + ms(300 * i as u64);
            assert_eq!(debouncer.push(q(text), now), Input::Scheduled(now + WINDOW));
            assert_eq!(debouncer.poll(now), None);
        }
        // last edit was at 900ms
        assert_eq!(debouncer.poll(start + ms(1899)), None);
        assert_eq!(debouncer.poll(start + ms(1900)), Some(q("paris")));
        assert_eq!(debouncer.poll(start + ms(5000)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn duplicate_does_not_restart_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(q("cats"), start);
        assert_eq!(debouncer.push(q("cats"), start + ms(500)), Input::Duplicate);
        assert_eq!(debouncer.deadline(), Some(start + WINDOW));
        assert_eq!(debouncer.poll(start + WINDOW), Some(q("cats")));
    }

    #[test]
    fn settled_text_is_not_searched_twice() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(q("cats"), start);
        assert_eq!(debouncer.poll(start + WINDOW), Some(q("cats")));
        assert_eq!(debouncer.push(q("cats"), start + ms(3000)), Input::Duplicate);
        assert_eq!(debouncer.poll(start + ms(9000)), None);
    }

    #[test]
    fn reverting_to_settled_text_cancels_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(q("pa"), start);
        assert_eq!(debouncer.poll(start + WINDOW), Some(q("pa")));
        debouncer.push(q("par"), start + ms(2000));
        assert_eq!(debouncer.push(q("pa"), start + ms(2100)), Input::Reverted);
        assert_eq!(debouncer.poll(start + ms(9000)), None);
    }

    #[test]
    fn empty_text_is_never_returned() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(q(""), start);
        assert_eq!(debouncer.poll(start + WINDOW), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn clearing_the_text_allows_the_same_search_again() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(q("dogs"), start);
        assert_eq!(debouncer.poll(start + WINDOW), Some(q("dogs")));
        debouncer.push(q(""), start + ms(2000));
        assert_eq!(debouncer.poll(start + ms(3000)), None);
        debouncer.push(q("dogs"), start + ms(4000));
        assert_eq!(debouncer.poll(start + ms(5000)), Some(q("dogs")));
    }

    #[test]
    fn flush_settles_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        assert_eq!(debouncer.flush(), None);
        debouncer.push(q("birds"), start);
        assert_eq!(debouncer.flush(), Some(q("birds")));
        assert_eq!(debouncer.push(q("birds"), start), Input::Duplicate);
    }
}
