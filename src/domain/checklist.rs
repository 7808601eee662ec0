//! Setup milestone checklist entity

/// The four fixed onboarding milestones, in display order.
/// Entries are never added, removed, or reordered.
pub const MILESTONES: [&str; 4] = [
    "Grant microphone permissions",
    "Test microphone",
    "Grant system audio/video permissions",
    "Test system recording",
];

/// Tracks completion of the fixed milestones.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    completed: [bool; MILESTONES.len()],
}

impl Checklist {
    /// Create a checklist with no milestone completed
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of milestones (always 4)
    pub fn len(&self) -> usize {
        MILESTONES.len()
    }

    /// A checklist is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Set the completed flag for a fixed-position entry.
    ///
    /// Out-of-range indices are ignored; returns whether the flag
    /// actually changed.
    pub fn set_completed(&mut self, index: usize, completed: bool) -> bool {
        match self.completed.get_mut(index) {
            Some(flag) if *flag != completed => {
                *flag = completed;
                true
            }
            _ => false,
        }
    }

    /// Check a single entry
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// How many milestones are complete
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|&&c| c).count()
    }

    /// Iterate `(index, description, completed)` in fixed order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'static str, bool)> + '_ {
        MILESTONES
            .iter()
            .enumerate()
            .map(|(i, &desc)| (i, desc, self.completed[i]))
    }
}
