use chrono::{DateTime, Utc};

use crate::{ScreenshotPreview, ScreenshotRef};

/// Monotonic tag attached to every screenshot listing request.
pub type Generation = u64;

/// Locally owned copy of the platform's screenshot list.
///
/// Contents are replaced wholesale by listings. A listing is only accepted
/// when it carries the current generation, so a slow response can never
/// overwrite state produced by a newer start, reset or confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenshotMirror {
    entries: Vec<ScreenshotRef>,
    generation: Generation,
}

impl ScreenshotMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScreenshotRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn get(&self, index: usize) -> Option<&ScreenshotRef> {
        self.entries.get(index)
    }

    /// Starts a new listing request and returns the tag its response must carry.
    pub fn begin_refresh(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Empties the mirror and orphans every outstanding listing request.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.entries.clear();
    }

    /// Replaces the contents with a listing. Returns `false` for stale listings.
    pub(crate) fn apply_listing(
        &mut self,
        generation: Generation,
        previews: Vec<ScreenshotPreview>,
        received_at: DateTime<Utc>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        let mut entries: Vec<ScreenshotRef> = Vec::with_capacity(previews.len());
        for preview in previews {
            let entry = ScreenshotRef::from_preview(preview, received_at);
            match entries.iter_mut().find(|existing| existing.id == entry.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        self.entries = entries;
        true
    }

    /// A failed listing empties the mirror, unless it is stale.
    pub(crate) fn apply_listing_failure(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.clear();
        true
    }

    /// Removes an entry the platform confirmed as deleted.
    ///
    /// The entry is located at `index` when it still holds `path` there,
    /// otherwise by path, so a refresh landing between request and
    /// confirmation cannot remove the wrong screenshot. Listings requested
    /// before the confirmation may still hold the entry and become stale.
    pub(crate) fn remove_confirmed(&mut self, index: usize, path: &str) -> bool {
        self.generation += 1;
        let position = match self.entries.get(index) {
            Some(entry) if entry.path == path => Some(index),
            _ => self.entries.iter().position(|entry| entry.path == path),
        };
        match position {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }
}
