use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Handle for one showing of the notice. A newer showing invalidates every
/// older ticket, so a dismissal scheduled for an earlier notice is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTicket(u64);

#[derive(Debug, Clone, PartialEq)]
enum NoticeState<T> {
    Hidden,
    Showing {
        payload: T,
        deadline: Instant,
        ticket: NoticeTicket,
    },
}

/// Auto-dismissing announcement slot.
#[derive(Debug, Clone)]
pub struct LeaderNotice<T> {
    state: NoticeState<T>,
    duration: Duration,
    issued: u64,
}

impl<T> LeaderNotice<T> {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: NoticeState::Hidden,
            duration,
            issued: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Shows `payload` until `now + duration`, replacing whatever was shown.
    pub fn show(&mut self, payload: T, now: Instant) -> NoticeTicket {
        self.issued += 1;
        let ticket = NoticeTicket(self.issued);
        self.state = NoticeState::Showing {
            payload,
            deadline: now + self.duration,
            ticket,
        };
        ticket
    }

    /// Hides the notice if `ticket` belongs to the current showing.
    /// Returns whether anything was dismissed.
    pub fn dismiss(&mut self, ticket: NoticeTicket) -> bool {
        match &self.state {
            NoticeState::Showing { ticket: current, .. } if *current == ticket => {
                self.state = NoticeState::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Expires the notice once its deadline has passed, then returns what is
    /// still visible.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        if let NoticeState::Showing { deadline, .. } = &self.state {
            if now >= *deadline {
                self.state = NoticeState::Hidden;
            }
        }
        self.current()
    }

    pub fn current(&self) -> Option<&T> {
        match &self.state {
            NoticeState::Showing { payload, .. } => Some(payload),
            NoticeState::Hidden => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            NoticeState::Showing { deadline, .. } => Some(*deadline),
            NoticeState::Hidden => None,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.current().is_some()
    }
}

impl<T> Default for LeaderNotice<T> {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::LeaderNotice;
    use std::time::{Duration, Instant};

    #[test]
    fn starts_hidden() {
        let mut notice: LeaderNotice<&str> = LeaderNotice::default();
        assert!(notice.poll(Instant::now()).is_none());
        assert_eq!(notice.duration(), Duration::from_secs(3));
    }

    #[test]
    fn expires_at_deadline() {
        let start = Instant::now();
        let mut notice = LeaderNotice::new(Duration::from_secs(3));
        notice.show("A leads", start);
        assert_eq!(notice.poll(start + Duration::from_secs(2)), Some(&"A leads"));
        assert_eq!(notice.poll(start + Duration::from_secs(3)), None);
    }

    #[test]
    fn reshow_restarts_timer_and_replaces_payload() {
        let start = Instant::now();
        let mut notice = LeaderNotice::new(Duration::from_secs(3));
        notice.show("first", start);
        notice.show("second", start + Duration::from_secs(2));
        assert_eq!(
            notice.poll(start + Duration::from_secs(4)),
            Some(&"second")
        );
        assert_eq!(notice.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn stale_ticket_does_not_dismiss_newer_notice() {
        let start = Instant::now();
        let mut notice = LeaderNotice::new(Duration::from_secs(3));
        let old = notice.show("first", start);
        let new = notice.show("second", start + Duration::from_secs(1));
        assert!(!notice.dismiss(old));
        assert_eq!(notice.current(), Some(&"second"));
        assert!(notice.dismiss(new));
        assert!(!notice.is_showing());
        assert!(notice.deadline().is_none());
    }
}
