//! In-memory mirrors of remote collections.
//!
//! The remote store is authoritative; a mirror only changes when a server
//! response confirms a mutation. Reconciliation is keyed by identity, never
//! by position — indices shift as entries are prepended.

/// Entities addressable by their server-assigned id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Ordered local copy of one remote collection, most recent first.
#[derive(Debug, Clone)]
pub struct Mirror<T> {
    items: Vec<T>,
}

impl<T> Default for Mirror<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mirror<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole collection from a list response. Insertion order is
    /// trusted as-is; the mirror never re-sorts.
    pub fn seed(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Identified> Mirror<T> {
    /// Insert a freshly created entity at the head.
    ///
    /// Any stale entry carrying the same identity is dropped first, so the
    /// mirror never holds two entities with one id.
    pub fn prepend(&mut self, entity: T) {
        self.items.retain(|existing| existing.id() != entity.id());
        self.items.insert(0, entity);
    }

    /// Replace the entity with the matching id wholesale — no field merge.
    ///
    /// Returns `false` when the id is not mirrored; nothing is inserted in
    /// that case.
    pub fn replace(&mut self, entity: T) -> bool {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
        {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Remove by id. An id that is not mirrored is a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|existing| existing.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|existing| existing.id() == id)
    }
}
