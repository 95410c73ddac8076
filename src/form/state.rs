use crate::models::ManagerRecord;

/// Where the editor is in its lifecycle.
///
/// Validation happens synchronously inside the submit handler, so it never
/// shows up as a phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Populated,
    Editing,
    Submitting,
    SubmittedOk,
    SubmitFailed,
    LoadFailed,
}

impl FormPhase {
    pub fn can_edit(&self) -> bool {
        matches!(
            self,
            Self::Populated | Self::Editing | Self::Submitting | Self::SubmitFailed
        )
    }

    /// False while a write is outstanding, which keeps the submit control disabled.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Populated | Self::Editing | Self::SubmitFailed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SubmittedOk | Self::LoadFailed)
    }
}

impl std::fmt::Display for FormPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormPhase::Loading => write!(f, "Loading"),
            FormPhase::Populated => write!(f, "Populated"),
            FormPhase::Editing => write!(f, "Editing"),
            FormPhase::Submitting => write!(f, "Submitting"),
            FormPhase::SubmittedOk => write!(f, "SubmittedOk"),
            FormPhase::SubmitFailed => write!(f, "SubmitFailed"),
            FormPhase::LoadFailed => write!(f, "LoadFailed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub record: ManagerRecord,
    pub phase: FormPhase,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            record: ManagerRecord::default(),
            phase: FormPhase::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_gate() {
        assert!(!FormPhase::Loading.can_submit());
        assert!(!FormPhase::Submitting.can_submit());
        assert!(!FormPhase::LoadFailed.can_submit());
        assert!(!FormPhase::SubmittedOk.can_submit());
        assert!(FormPhase::Populated.can_submit());
        assert!(FormPhase::Editing.can_submit());
        assert!(FormPhase::SubmitFailed.can_submit());
    }

    #[test]
    fn edits_allowed_while_submitting() {
        assert!(FormPhase::Submitting.can_edit());
        assert!(!FormPhase::Loading.can_edit());
        assert!(!FormPhase::LoadFailed.can_edit());
    }
}
