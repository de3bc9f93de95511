/// Monotonic request counter for one state slot.
///
/// Each fetch takes a ticket when it starts; on completion only the holder of
/// the latest ticket may write the slot. Older completions are discarded.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.issued
    }

    /// Number of tickets issued so far.
    #[cfg(test)]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
