use crate::error::BinderError;
use crate::generation::Ticket;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RegionState<T> {
    #[default]
    Idle,
    Ready(T),
    Failed(String),
}

/// One output region of the page: the last applied result of its binder.
///
/// Previous content stays visible while a request is pending. Responses are
/// applied in issue order: a response whose ticket has been superseded is
/// dropped, so a slow early request can't overwrite a newer result.
#[derive(Clone, Debug, PartialEq)]
pub struct Region<T> {
    generation: u64,
    pending: bool,
    state: RegionState<T>,
}

impl<T> Region<T> {
    pub fn new() -> Self {
        Self { generation: 0, pending: false, state: RegionState::Idle }
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.pending = true;
        Ticket { key: (), generation: self.generation }
    }

    /// Apply a binder result. Returns `false` if the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, BinderError>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.pending = false;
        self.state = match result {
            Ok(value) => RegionState::Ready(value),
            Err(e) => RegionState::Failed(e.user_message()),
        };
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn state(&self) -> &RegionState<T> {
        &self.state
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            RegionState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RegionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> Default for Region<T> {
    fn default() -> Self {
        Self::new()
    }
}
