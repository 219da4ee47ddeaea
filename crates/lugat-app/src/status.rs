use std::fmt;

/// Counters for the current interactive session
#[derive(Clone, Debug, Default)]
pub struct SessionStatus {
    pub lookups: u64,
    pub failed_lookups: u64,
    pub cards_saved: u64,
    pub last_error: Option<String>,
}

impl SessionStatus {
    pub fn record_lookup(&mut self, result: Result<(), String>) {
        self.lookups += 1;
        if let Err(e) = result {
            self.failed_lookups += 1;
            self.last_error = Some(e);
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lookups ({} failed), {} cards saved",
            self.lookups, self.failed_lookups, self.cards_saved
        )?;
        if let Some(e) = &self.last_error {
            write!(f, ", last error: {e}")?;
        }
        Ok(())
    }
}
