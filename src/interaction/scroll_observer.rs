use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{ScrollViewport, StageRegion, VisibilityWindow};

/// A stage region crossed into the visibility window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryEvent {
    pub stage_index: usize,
}

/// Single-consumer end of the observer's event stream.
#[derive(Debug)]
pub struct EntryStream {
    receiver: Receiver<EntryEvent>,
}

impl EntryStream {
    /// Next pending event, if any. Never blocks.
    #[must_use]
    pub fn try_next(&self) -> Option<EntryEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drains every pending event in delivery order.
    pub fn drain(&self) -> impl Iterator<Item = EntryEvent> + '_ {
        self.receiver.try_iter()
    }
}

/// Watches stage regions and reports rising crossings into the window.
///
/// The host measures stage elements and feeds them through
/// [`ScrollObserver::on_scroll`]; a region emits once when it enters and must
/// leave the window before it can emit again. A watched stage missing from a
/// frame counts as outside the window, so hosts may report only the stage
/// elements currently on screen.
#[derive(Debug)]
pub struct ScrollObserver {
    window: VisibilityWindow,
    // stage index -> region currently inside the window
    watched: IndexMap<usize, bool>,
    sender: Sender<EntryEvent>,
}

impl ScrollObserver {
    /// Creates an observer together with the stream its events are sent on.
    #[must_use]
    pub fn channel(window: VisibilityWindow) -> (Self, EntryStream) {
        let (sender, receiver) = channel();
        let observer = Self {
            window,
            watched: IndexMap::new(),
            sender,
        };
        (observer, EntryStream { receiver })
    }

    #[must_use]
    pub fn window(&self) -> VisibilityWindow {
        self.window
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        !self.watched.is_empty()
    }

    #[must_use]
    pub fn watched_len(&self) -> usize {
        self.watched.len()
    }

    /// Starts watching `stage_indices`, replacing any previous watch set.
    ///
    /// The previous set is torn down first. Duplicate indices collapse into
    /// one watch. Returns the number of watched stages; an empty input is
    /// logged and leaves the observer idle.
    pub fn observe<I>(&mut self, stage_indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        self.teardown();
        self.watched = stage_indices.into_iter().map(|index| (index, false)).collect();
        if self.watched.is_empty() {
            warn!("no stage elements found to observe; scroll interaction disabled");
        } else {
            debug!(stages = self.watched.len(), "observing stage regions");
        }
        self.watched.len()
    }

    /// Drops every watch. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if !self.watched.is_empty() {
            debug!(stages = self.watched.len(), "tearing down stage watches");
        }
        self.watched.clear();
    }

    /// Evaluates measured regions and emits an event for each watched region
    /// that just entered the window, in the order the regions are given.
    ///
    /// Returns the stage indices that were emitted.
    pub fn on_scroll(
        &mut self,
        viewport: ScrollViewport,
        regions: &[StageRegion],
    ) -> SmallVec<[usize; 4]> {
        let mut entered = SmallVec::new();
        if !viewport.is_valid() {
            warn!(height = viewport.height, "skipping scroll frame with invalid viewport");
            return entered;
        }

        // A watched stage the host did not report this frame is off screen.
        for (stage_index, inside) in &mut self.watched {
            if !regions.iter().any(|region| region.stage_index == *stage_index) {
                *inside = false;
            }
        }

        for region in regions {
            let Some(inside) = self.watched.get_mut(&region.stage_index) else {
                continue;
            };
            let now_inside = self.window.is_entered(*region, viewport);
            let crossed_in = now_inside && !*inside;
            *inside = now_inside;
            if !crossed_in {
                continue;
            }

            let event = EntryEvent {
                stage_index: region.stage_index,
            };
            if self.sender.send(event).is_err() {
                warn!(stage_index = region.stage_index, "entry stream closed; dropping event");
                continue;
            }
            entered.push(region.stage_index);
        }
        entered
    }
}
