use crate::error::DetailError;
use crate::model::{Identifier, Record};
use crate::reader::RecordReader;

/// What the detail page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No identifier has been requested yet.
    Idle,
    Loading,
    Loaded(Record),
    /// The read failed. Network, status and parse errors are not told apart.
    Failed,
}

/// Proof that a read was issued for a specific identifier change.
///
/// Completions carry the ticket back so results for an identifier that has
/// since been replaced can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: Identifier,
    generation: u64,
}

/// Holds the view state for one identifier at a time.
#[derive(Debug)]
pub struct DetailController {
    current: Option<Identifier>,
    generation: u64,
    state: ViewState,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self {
            current: None,
            generation: 0,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Switches to `id`. Returns a ticket when a read must be issued, or
    /// `None` when `id` is already the current identifier.
    pub fn set_identifier(&mut self, id: Identifier) -> Option<FetchTicket> {
        if self.current.as_ref() == Some(&id) {
            tracing::debug!("Identifier {} unchanged, no fetch issued", id);
            return None;
        }

        self.generation += 1;
        self.current = Some(id.clone());
        self.state = ViewState::Loading;
        tracing::debug!("Identifier changed to {} (generation {})", id, self.generation);

        Some(FetchTicket {
            id,
            generation: self.generation,
        })
    }

    /// Applies the outcome of the read behind `ticket`. Returns `false` and
    /// leaves the state untouched when the ticket has been superseded.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Record, DetailError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale response for {} (generation {}, current {})",
                ticket.id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(record) => ViewState::Loaded(record),
            Err(e) => {
                tracing::warn!("Failed to fetch record {}: {}", ticket.id, e);
                ViewState::Failed
            }
        };
        true
    }

    /// Sets the identifier and, if it changed, performs the read.
    pub async fn load<R>(&mut self, reader: &R, id: Identifier) -> &ViewState
    where
        R: RecordReader + ?Sized,
    {
        if let Some(ticket) = self.set_identifier(id) {
            let result = reader.fetch(&ticket.id).await;
            self.complete(ticket, result);
        }
        &self.state
    }
}
