use indexmap::IndexMap;
use indexmap::map::Keys;

use crate::error::{ScrollyError, ScrollyResult};
use crate::extensions::VisualizationHandle;

/// Name-to-handle mapping for every chart in the story.
///
/// Ids keep registration order; handles are never removed.
#[derive(Debug, Default)]
pub struct VisualizationRegistry {
    handles: IndexMap<String, VisualizationHandle>,
}

impl VisualizationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, handle: VisualizationHandle) -> ScrollyResult<()> {
        let id = id.into();
        if self.handles.contains_key(&id) {
            return Err(ScrollyError::DuplicateId(id));
        }
        self.handles.insert(id, handle);
        Ok(())
    }

    pub fn get(&self, id: &str) -> ScrollyResult<&VisualizationHandle> {
        self.handles
            .get(id)
            .ok_or_else(|| ScrollyError::UnknownVisualization(id.to_owned()))
    }

    pub fn get_mut(&mut self, id: &str) -> ScrollyResult<&mut VisualizationHandle> {
        self.handles
            .get_mut(id)
            .ok_or_else(|| ScrollyError::UnknownVisualization(id.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.handles.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered ids in registration order.
    ///
    /// Each call starts a fresh pass; the returned iterator is also `Clone`.
    #[must_use]
    pub fn all_ids(&self) -> AllIds<'_> {
        AllIds {
            keys: self.handles.keys(),
        }
    }

    pub(crate) fn handles_mut(
        &mut self,
    ) -> impl Iterator<Item = (&str, &mut VisualizationHandle)> {
        self.handles
            .iter_mut()
            .map(|(id, handle)| (id.as_str(), handle))
    }
}

/// Iterator over registered visualization ids.
#[derive(Debug, Clone)]
pub struct AllIds<'a> {
    keys: Keys<'a, String, VisualizationHandle>,
}

impl<'a> Iterator for AllIds<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for AllIds<'_> {}
