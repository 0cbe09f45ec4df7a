use fixed_map::Key as FixedKey;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::Triangle;

/// A linguistic term, usually a fieldless enum deriving [`Key`].
pub trait Term: FixedKey + Copy + 'static {
    /// The label the term is registered under on its variable.
    fn name(self) -> &'static str;
}

/// Typed term declarations for one variable.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Triangle>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, membership: impl Into<Triangle>) {
        self.0.insert(key, membership.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn named(&self) -> impl Iterator<Item = (&'static str, Triangle)> + '_ {
        self.0.iter().map(|(k, t)| (k.name(), *t))
    }
}

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}
