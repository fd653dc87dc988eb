//! Optimistic list edits with explicit reconciliation.
//!
//! Every edit is applied to the local list immediately and remembered under
//! an [`OpId`]. When the backend answers, the caller either confirms the op
//! (optionally replacing the item with the server's copy) or rolls it back,
//! which restores exactly what the edit changed.

/// Something with a stable identity inside a list.
pub trait Keyed {
    fn key(&self) -> &str;
}

pub type OpId = u64;

#[derive(Debug, Clone, PartialEq)]
enum Undo<T> {
    /// Created item: remove it.
    Remove(String),
    /// Updated item: put the old value back.
    Restore(T),
    /// Deleted item: reinsert at its old position.
    Reinsert(usize, T),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticList<T> {
    items: Vec<T>,
    pending: Vec<(OpId, Undo<T>)>,
    next_op: OpId,
}

impl<T> Default for OptimisticList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: Vec::new(),
            next_op: 0,
        }
    }
}

impl<T: Keyed + Clone> OptimisticList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|i| i.key() == key)
    }

    fn record(&mut self, undo: Undo<T>) -> OpId {
        self.next_op += 1;
        self.pending.push((self.next_op, undo));
        self.next_op
    }

    /// Append `item`.
    pub fn apply_create(&mut self, item: T) -> OpId {
        let key = item.key().to_string();
        self.items.push(item);
        self.record(Undo::Remove(key))
    }

    /// Replace the item with the same key. `None` if it is not in the list.
    pub fn apply_update(&mut self, item: T) -> Option<OpId> {
        let idx = self.position(item.key())?;
        let previous = std::mem::replace(&mut self.items[idx], item);
        Some(self.record(Undo::Restore(previous)))
    }

    /// Remove the item with `key`. `None` if it is not in the list.
    pub fn apply_delete(&mut self, key: &str) -> Option<OpId> {
        let idx = self.position(key)?;
        let removed = self.items.remove(idx);
        Some(self.record(Undo::Reinsert(idx, removed)))
    }

    /// Accept an op. If the server returned its own copy of the item, it
    /// replaces the optimistic one (matched by the op's original key). When a
    /// later edit of the same item is still pending, the server copy becomes
    /// what that edit would restore instead.
    pub fn confirm(&mut self, op: OpId, server_item: Option<T>) -> bool {
        let Some((at, undo)) = self.take(op) else {
            return false;
        };
        let Some(item) = server_item else {
            return true;
        };
        let key = match &undo {
            Undo::Remove(key) => key.clone(),
            Undo::Restore(prev) => prev.key().to_string(),
            Undo::Reinsert(..) => return true,
        };
        if let Some(later) = self.later_op(at, &key) {
            match later {
                Undo::Restore(value) | Undo::Reinsert(_, value) => *value = item,
                Undo::Remove(_) => {}
            }
        } else if let Some(idx) = self.position(&key) {
            self.items[idx] = item;
        }
        true
    }

    /// Undo an op.
    ///
    /// If a later edit of the same item is still pending, the list is left as
    /// it is and that edit inherits this op's undo, so rejected edits unwind
    /// to the last accepted state in any order.
    pub fn rollback(&mut self, op: OpId) -> bool {
        let Some((at, undo)) = self.take(op) else {
            return false;
        };
        let key = undo.key().to_string();
        if let Some(later) = self.later_op(at, &key) {
            *later = undo.chain(later);
            return true;
        }
        match undo {
            Undo::Remove(key) => {
                if let Some(idx) = self.position(&key) {
                    self.items.remove(idx);
                }
            }
            Undo::Restore(previous) => {
                if let Some(idx) = self.position(previous.key()) {
                    self.items[idx] = previous;
                }
            }
            Undo::Reinsert(idx, item) => {
                let idx = idx.min(self.items.len());
                self.items.insert(idx, item);
            }
        }
        true
    }

    /// Remove a pending op, returning where it sat in the pending log.
    fn take(&mut self, op: OpId) -> Option<(usize, Undo<T>)> {
        let at = self.pending.iter().position(|(id, _)| *id == op)?;
        Some((at, self.pending.remove(at).1))
    }

    /// First pending op on `key` recorded after position `at`.
    fn later_op(&mut self, at: usize, key: &str) -> Option<&mut Undo<T>> {
        self.pending[at..]
            .iter_mut()
            .map(|(_, undo)| undo)
            .find(|undo| undo.key() == key)
    }
}

impl<T: Keyed + Clone> Undo<T> {
    fn key(&self) -> &str {
        match self {
            Self::Remove(key) => key,
            Self::Restore(item) | Self::Reinsert(_, item) => item.key(),
        }
    }

    /// Undo for `later` once this earlier op on the same item is withdrawn:
    /// the state to return to is the one from before this op.
    fn chain(self, later: &Undo<T>) -> Undo<T> {
        match (self, later) {
            (Self::Remove(key), _) => Self::Remove(key),
            (Self::Restore(prev) | Self::Reinsert(_, prev), Self::Reinsert(idx, _)) => {
                Self::Reinsert(*idx, prev)
            }
            (Self::Restore(prev) | Self::Reinsert(_, prev), _) => Self::Restore(prev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: &'static str,
    }

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, name: &'static str) -> Row {
        Row {
            id: id.to_string(),
            name,
        }
    }

    fn list() -> OptimisticList<Row> {
        OptimisticList::new(vec![row("a", "Ada"), row("b", "Bo"), row("c", "Cy")])
    }

    #[test]
    fn test_create_confirm_with_server_copy() {
        let mut l = list();
        let op = l.apply_create(row("tmp_1", "Di"));
        assert_eq!(l.items().len(), 4);

        assert!(l.confirm(op, Some(row("d", "Di"))));
        assert!(l.get("tmp_1").is_none());
        assert_eq!(l.get("d").map(|r| r.name), Some("Di"));
        assert!(!l.has_pending());
    }

    #[test]
    fn test_create_rollback() {
        let mut l = list();
        let op = l.apply_create(row("tmp_1", "Di"));
        assert!(l.rollback(op));
        assert_eq!(l.items(), list().items());
    }

    #[test]
    fn test_update_rollback_restores_previous() {
        let mut l = list();
        let op = l.apply_update(row("b", "Bob")).unwrap();
        assert_eq!(l.get("b").map(|r| r.name), Some("Bob"));
        assert!(l.rollback(op));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bo"));
    }

    #[test]
    fn test_update_missing_is_none() {
        let mut l = list();
        assert_eq!(l.apply_update(row("zz", "Nobody")), None);
        assert!(!l.has_pending());
    }

    #[test]
    fn test_delete_rollback_keeps_position() {
        let mut l = list();
        let op = l.apply_delete("b").unwrap();
        assert_eq!(l.items().len(), 2);
        assert!(l.rollback(op));
        assert_eq!(l.items(), list().items());
    }

    #[test]
    fn test_unknown_op_ignored() {
        let mut l = list();
        let op = l.apply_delete("a").unwrap();
        assert!(l.confirm(op, None));
        assert!(!l.confirm(op, None));
        assert!(!l.rollback(op));
        assert_eq!(l.items().len(), 2);
    }

    #[test]
    fn test_interleaved_ops() {
        let mut l = list();
        let del = l.apply_delete("a").unwrap();
        let upd = l.apply_update(row("c", "Cyd")).unwrap();

        assert!(l.rollback(del));
        assert!(l.confirm(upd, None));
        assert_eq!(l.items()[0], row("a", "Ada"));
        assert_eq!(l.get("c").map(|r| r.name), Some("Cyd"));
    }

    #[test]
    fn test_overlapping_updates_both_rejected() {
        let mut l = list();
        let first = l.apply_update(row("b", "Bob")).unwrap();
        let second = l.apply_update(row("b", "Bobby")).unwrap();

        assert!(l.rollback(first));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bobby"));
        assert!(l.rollback(second));
        assert_eq!(l.items(), list().items());
        assert!(!l.has_pending());
    }

    #[test]
    fn test_overlapping_updates_rejected_newest_first() {
        let mut l = list();
        let first = l.apply_update(row("b", "Bob")).unwrap();
        let second = l.apply_update(row("b", "Bobby")).unwrap();

        assert!(l.rollback(second));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bob"));
        assert!(l.rollback(first));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bo"));
    }

    #[test]
    fn test_rejected_first_edit_keeps_accepted_second() {
        let mut l = list();
        let first = l.apply_update(row("b", "Bob")).unwrap();
        let second = l.apply_update(row("b", "Bobby")).unwrap();

        assert!(l.rollback(first));
        assert!(l.confirm(second, None));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bobby"));
    }

    #[test]
    fn test_server_copy_of_earlier_edit_survives_later_rollback() {
        let mut l = list();
        let first = l.apply_update(row("b", "Bob")).unwrap();
        let second = l.apply_update(row("b", "Bobby")).unwrap();

        assert!(l.confirm(first, Some(row("b", "Robert"))));
        assert_eq!(l.get("b").map(|r| r.name), Some("Bobby"));
        assert!(l.rollback(second));
        assert_eq!(l.get("b").map(|r| r.name), Some("Robert"));
    }

    #[test]
    fn test_update_then_delete_both_rejected() {
        let mut l = list();
        let upd = l.apply_update(row("b", "Bob")).unwrap();
        let del = l.apply_delete("b").unwrap();

        assert!(l.rollback(upd));
        assert!(l.get("b").is_none());
        assert!(l.rollback(del));
        assert_eq!(l.items(), list().items());
    }
}
