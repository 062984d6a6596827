//! User-facing outcome messages.

use std::fmt;

/// Result of a user command that the shell reports in a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    NothingToLoad,
    Loaded { count: usize },
    LoadFailed { reason: String },
    SaveFailed { reason: String },
    Cleared,
}

impl Notice {
    /// Headline shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Saved => "Layout saved successfully!",
            Notice::NothingToLoad => "No saved layout found!",
            Notice::Loaded { .. } => "Layout loaded successfully!",
            Notice::LoadFailed { .. } => "Error loading layout!",
            Notice::SaveFailed { .. } => "Error saving layout!",
            Notice::Cleared => "Canvas cleared.",
        }
    }

    /// Extra detail for the dialog body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Notice::LoadFailed { reason } | Notice::SaveFailed { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::LoadFailed { .. } | Notice::SaveFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{} ({})", self.message(), detail),
            None => f.write_str(self.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Notice::Saved.to_string(), "Layout saved successfully!");
        assert_eq!(Notice::NothingToLoad.to_string(), "No saved layout found!");
        assert_eq!(Notice::Loaded { count: 2 }.to_string(), "Layout loaded successfully!");
    }

    #[test]
    fn test_errors_carry_detail() {
        let notice = Notice::LoadFailed { reason: "bad json".to_string() };
        assert!(notice.is_error());
        assert_eq!(notice.detail(), Some("bad json"));
        assert_eq!(notice.to_string(), "Error loading layout! (bad json)");
        assert!(!Notice::Saved.is_error());
    }
}
