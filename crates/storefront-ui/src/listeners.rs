//! Per-anchor listener bookkeeping for page adapters.

use std::collections::HashMap;

use crate::page::Anchor;

/// Listeners grouped by the anchor they were bound under.
///
/// Replaced listeners are detached right away but kept alive until the next
/// [`sweep`](Self::sweep): one of them may be the callback that triggered the
/// rebind and is still on the stack.
#[derive(Debug)]
pub(crate) struct ListenerSet<L> {
    active: HashMap<Anchor, Vec<L>>,
    retired: Vec<L>,
}

impl<L> Default for ListenerSet<L> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
            retired: Vec::new(),
        }
    }
}

impl<L> ListenerSet<L> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Install `listeners` for `anchor`, detaching the ones they replace.
    pub(crate) fn replace(&mut self, anchor: Anchor, listeners: Vec<L>, mut detach: impl FnMut(&L)) {
        if let Some(old) = self.active.insert(anchor, listeners) {
            old.iter().for_each(&mut detach);
            self.retired.extend(old);
        }
    }

    /// Drop retired listeners. Call only from outside any listener callback.
    pub(crate) fn sweep(&mut self) {
        self.retired.clear();
    }

    pub(crate) fn active(&self, anchor: Anchor) -> usize {
        self.active.get(&anchor).map_or(0, Vec::len)
    }

    pub(crate) fn retired(&self) -> usize {
        self.retired.len()
    }
}
