// Keyshortcut Event Pump
// Drains a host key-event source into a dispatcher

use std::convert::Infallible;

use crate::{Dispatcher, KeyEvent};

/// A host environment that delivers key events one at a time.
///
/// `Ok(None)` means the source has ended.
pub trait EventSource {
    type Error;

    fn next_event(&mut self) -> Result<Option<KeyEvent>, Self::Error>;
}

/// Event source over any iterator of events, mostly useful in tests and replays
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    events: I,
}

impl<I: Iterator<Item = KeyEvent>> IterSource<I> {
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<I: Iterator<Item = KeyEvent>> EventSource for IterSource<I> {
    type Error = Infallible;

    fn next_event(&mut self) -> Result<Option<KeyEvent>, Self::Error> {
        Ok(self.events.next())
    }
}

/// Counters collected while pumping events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Events read from the source
    pub received: usize,
    /// Events the dispatcher accepted as keydowns
    pub dispatched: usize,
    /// Total records fired across all dispatched events
    pub fired: usize,
    /// Diagnostic entries emitted
    pub logged: usize,
}

/// Feeds every event from a source into one dispatcher.
///
/// Stops when the source ends or the dispatcher is closed, which lets a
/// shortcut action end the pump by closing the dispatcher.
#[derive(Debug)]
pub struct EventPump<'d> {
    dispatcher: &'d Dispatcher,
}

impl<'d> EventPump<'d> {
    pub fn new(dispatcher: &'d Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run until the source ends or the dispatcher closes
    pub fn run<S: EventSource>(&self, source: &mut S) -> Result<PumpStats, S::Error> {
        let mut stats = PumpStats::default();
        while !self.dispatcher.is_closed() {
            let Some(mut event) = source.next_event()? else {
                break;
            };
            stats.received += 1;
            if let Some(dispatch) = self.dispatcher.handle_event(&mut event) {
                stats.dispatched += 1;
                stats.fired += dispatch.fired().len();
                if dispatch.log().is_some() {
                    stats.logged += 1;
                }
            }
        }
        log::debug!(
            "event pump stopped after {} event(s), {} dispatched",
            stats.received,
            stats.dispatched
        );
        Ok(stats)
    }
}
