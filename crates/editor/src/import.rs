use crate::notice::Notice;

/// Proof that an import was started; hand it back to finish or cancel.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportTicket(u64);

/// Allows one project load in flight at a time.
#[derive(Debug, Default)]
pub struct ImportGuard {
    pending: Option<u64>,
    issued: u64,
}

impl ImportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin(&mut self) -> Result<ImportTicket, Notice> {
        if self.pending.is_some() {
            return Err(Notice::ImportInProgress);
        }
        self.issued += 1;
        self.pending = Some(self.issued);
        Ok(ImportTicket(self.issued))
    }

    /// Releases the guard if `ticket` is the one in flight.
    pub fn finish(&mut self, ticket: ImportTicket) -> Result<(), Notice> {
        self.release(ticket)
    }

    /// Releases the guard for a load that produced no payload.
    pub fn cancel(&mut self, ticket: ImportTicket) -> Result<(), Notice> {
        self.release(ticket)
    }

    fn release(&mut self, ticket: ImportTicket) -> Result<(), Notice> {
        if self.pending == Some(ticket.0) {
            self.pending = None;
            Ok(())
        } else {
            Err(Notice::NoImportPending)
        }
    }
}
