use crate::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<A> {
    id: TimerId,
    due: Millis,
    action: A,
}

/// A cancellable set of one-shot timers sharing one clock.
///
/// Offsets are relative to the group's current time, which moves forward
/// as due timers are popped. A timer scheduled while handling another one
/// is therefore relative to the due time of the handled timer, not to the
/// host tick that delivered it.
#[derive(Debug)]
pub struct TimerGroup<A> {
    now: Millis,
    pending: Vec<Pending<A>>,
    next_id: u64,
    disposed: bool,
}

impl<A> TimerGroup<A> {
    pub fn new(now: Millis) -> Self {
        Self {
            now,
            pending: Vec::new(),
            next_id: 0,
            disposed: false,
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `action` to fire `offset` ms from now.
    ///
    /// Returns `None` once the group has been disposed.
    pub fn schedule(&mut self, offset: Millis, action: A) -> Option<TimerId> {
        if self.disposed {
            return None;
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(offset);
        // Keep `pending` sorted by (due, id); ties fire in schedule order.
        let at = self.pending.partition_point(|p| p.due <= due);
        self.pending.insert(at, Pending { id, due, action });
        Some(id)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Cancel everything and refuse further scheduling.
    pub fn dispose(&mut self) {
        self.pending.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, A)> {
        if self.pending.first().is_none_or(|p| p.due > until) {
            return None;
        }
        let p = self.pending.remove(0);
        self.now = self.now.max(p.due);
        Some((p.due, p.action))
    }

    /// Move the clock to `now` after all due timers were handled.
    pub fn settle(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Pop every due timer up to `now`, then settle there.
    pub fn drain_until(&mut self, now: Millis) -> Vec<(Millis, A)> {
        let mut fired = Vec::new();
        while let Some(item) = self.pop_due(now) {
            fired.push(item);
        }
        self.settle(now);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_offset_then_schedule_order() {
        let mut g = TimerGroup::new(0);
        g.schedule(30, 'c');
        g.schedule(10, 'a');
        g.schedule(30, 'd');
        g.schedule(20, 'b');
        let fired: Vec<_> = g.drain_until(100).into_iter().map(|(_, a)| a).collect();
        assert_eq!(fired, vec!['a', 'b', 'c', 'd']);
        assert!(g.is_idle());
    }

    #[test]
    fn nothing_fires_early() {
        let mut g = TimerGroup::new(0);
        g.schedule(50, ());
        assert!(g.drain_until(49).is_empty());
        assert_eq!(g.drain_until(50).len(), 1);
    }

    #[test]
    fn chained_offsets_are_relative_to_due_time() {
        let mut g = TimerGroup::new(0);
        g.schedule(50, 1);
        // One large tick: the follow-up is due at 100, not at 1000 + 50.
        let mut fired = Vec::new();
        while let Some((due, n)) = g.pop_due(1000) {
            fired.push((due, n));
            if n < 3 {
                g.schedule(50, n + 1);
            }
        }
        assert_eq!(fired, vec![(50, 1), (100, 2), (150, 3)]);
    }

    #[test]
    fn cancel_removes_single_timer() {
        let mut g = TimerGroup::new(0);
        let Some(a) = g.schedule(10, 'a') else {
            unreachable!("group is live");
        };
        g.schedule(10, 'b');
        assert!(g.cancel(a));
        assert!(!g.cancel(a));
        let fired: Vec<_> = g.drain_until(10).into_iter().map(|(_, x)| x).collect();
        assert_eq!(fired, vec!['b']);
    }

    #[test]
    fn disposed_group_never_fires() {
        let mut g = TimerGroup::new(0);
        g.schedule(10, ());
        g.dispose();
        assert!(g.schedule(5, ()).is_none());
        assert!(g.drain_until(10_000).is_empty());
        assert!(g.is_disposed());
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut g: TimerGroup<()> = TimerGroup::new(500);
        g.settle(100);
        assert_eq!(g.now(), 500);
    }
}
