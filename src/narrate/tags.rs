use crate::VehicleId;
use slotmap::SecondaryMap;

/// The largest tag handed out before numbering starts over.
const MAX_TAG: u32 = 999;

/// Short numeric names for vehicles, stable for the lifetime of a scenario.
///
/// Tags are handed out in order of first mention, starting at 1. Once more
/// than 999 vehicles have been named, numbering wraps and tags may repeat.
#[derive(Clone, Debug)]
pub struct DisplayTags {
    tags: SecondaryMap<VehicleId, u32>,
    next: u32,
}

impl Default for DisplayTags {
    fn default() -> Self {
        Self {
            tags: SecondaryMap::new(),
            next: 1,
        }
    }
}

impl DisplayTags {
    pub fn new() -> Self {
        Default::default()
    }

    /// Gets the tag of a vehicle, naming it if it has none yet.
    pub fn tag(&mut self, id: VehicleId) -> u32 {
        if let Some(tag) = self.tags.get(id) {
            return *tag;
        }
        let tag = self.next;
        self.next = self.next % MAX_TAG + 1;
        self.tags.insert(id, tag);
        tag
    }

    /// Gets the tag of a vehicle without naming it.
    pub fn get(&self, id: VehicleId) -> Option<u32> {
        self.tags.get(id).copied()
    }

    /// Forgets all tags.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
