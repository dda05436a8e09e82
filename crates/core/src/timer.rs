//! Timer queue - deferred engine tasks on the virtual clock
//!
//! Every task is tagged with the session generation that scheduled it.
//! Starting a new session clears the queue, and the game state also ignores
//! anything that fires for a generation other than the live one.

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Turn a mismatched pair face down again.
    FlipBack,
    /// Recompute elapsed time (re-armed every second while playing).
    ElapsedRefresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TimerId,
    pub generation: u32,
    pub due_ms: u64,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, generation: u32, due_ms: u64, kind: TaskKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            generation,
            due_ms,
            kind,
        });
        id
    }

    /// Cancel one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every task of `kind` scheduled by `generation`.
    pub fn cancel_kind(&mut self, generation: u32, kind: TaskKind) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|t| !(t.generation == generation && t.kind == kind));
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    ///
    /// Ties on the due time fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        let (idx, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))?;
        Some(self.tasks.swap_remove(idx))
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_ms).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_scheduled(&self, generation: u32, kind: TaskKind) -> bool {
        self.tasks
            .iter()
            .any(|t| t.generation == generation && t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(1, 300, TaskKind::FlipBack);
        q.schedule(1, 100, TaskKind::ElapsedRefresh);
        q.schedule(1, 200, TaskKind::FlipBack);

        assert!(q.pop_due(50).is_none());
        let order: Vec<u64> = std::iter::from_fn(|| q.pop_due(1000))
            .map(|t| t.due_ms)
            .collect();
        assert_eq!(order, vec![100, 200, 300]);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        let a = q.schedule(1, 100, TaskKind::ElapsedRefresh);
        let b = q.schedule(1, 100, TaskKind::FlipBack);

        assert_eq!(q.pop_due(100).unwrap().id, a);
        assert_eq!(q.pop_due(100).unwrap().id, b);
    }

    #[test]
    fn cancel_single_task() {
        let mut q = TimerQueue::new();
        let id = q.schedule(1, 100, TaskKind::FlipBack);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.pop_due(1000).is_none());
    }

    #[test]
    fn cancel_kind_only_touches_its_generation() {
        let mut q = TimerQueue::new();
        q.schedule(1, 100, TaskKind::ElapsedRefresh);
        q.schedule(2, 100, TaskKind::ElapsedRefresh);
        q.schedule(1, 100, TaskKind::FlipBack);

        assert_eq!(q.cancel_kind(1, TaskKind::ElapsedRefresh), 1);
        assert_eq!(q.len(), 2);
        assert!(q.is_scheduled(2, TaskKind::ElapsedRefresh));
        assert!(q.is_scheduled(1, TaskKind::FlipBack));
        assert!(!q.is_scheduled(1, TaskKind::ElapsedRefresh));
    }

    #[test]
    fn next_due() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_due_ms(), None);
        q.schedule(1, 500, TaskKind::FlipBack);
        q.schedule(1, 250, TaskKind::FlipBack);
        assert_eq!(q.next_due_ms(), Some(250));
        q.clear();
        assert_eq!(q.next_due_ms(), None);
    }
}
