use stickbrawl_shared::Side;

/// Presentation-side state changes that happen some ticks after the event
/// that caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    ShowFight,
    AnnounceRound(u32),
    StartNextRound,
    ShowWinner(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub due: u64,
    pub epoch: u64,
    pub action: DeferredAction,
}

/// Tick-based deferral queue. Every entry is stamped with the round epoch it
/// was scheduled in; the caller drops entries whose epoch has been superseded.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: u64, epoch: u64, action: DeferredAction) {
        self.pending.push(Deferred { due, epoch, action });
    }

    /// Remove and return every entry due at or before `now`, earliest first.
    /// Entries due on the same tick keep their scheduling order.
    pub fn take_due(&mut self, now: u64) -> Vec<Deferred> {
        let (mut due, rest): (Vec<Deferred>, Vec<Deferred>) =
            self.pending.drain(..).partition(|d| d.due <= now);
        self.pending = rest;
        due.sort_by_key(|d| d.due);
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_returns_only_expired_in_order() {
        let mut s = Scheduler::new();
        s.schedule(30, 1, DeferredAction::StartNextRound);
        s.schedule(10, 1, DeferredAction::AnnounceRound(2));
        s.schedule(10, 1, DeferredAction::ShowFight);
        s.schedule(50, 1, DeferredAction::ShowWinner(Side::Player1));

        assert!(s.take_due(9).is_empty());
        let due = s.take_due(30);
        let actions: Vec<DeferredAction> = due.iter().map(|d| d.action).collect();
        assert_eq!(
            actions,
            vec![
                DeferredAction::AnnounceRound(2),
                DeferredAction::ShowFight,
                DeferredAction::StartNextRound,
            ]
        );
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(5, 0, DeferredAction::ShowFight);
        s.clear();
        assert!(s.is_empty());
        assert!(s.take_due(100).is_empty());
    }
}
