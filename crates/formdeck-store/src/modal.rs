//! Modal visibility flags

use formdeck_core::ModalId;
use serde::Serialize;

/// Open/closed flag per modal, all closed by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModalVisibility {
    pub manual: bool,
    pub schema: bool,
}

impl ModalVisibility {
    /// Whether the modal is open
    #[inline]
    #[must_use]
    pub fn is_open(&self, modal: ModalId) -> bool {
        match modal {
            ModalId::Manual => self.manual,
            ModalId::Schema => self.schema,
        }
    }

    /// Set a flag, returning whether it changed
    pub fn set(&mut self, modal: ModalId, open: bool) -> bool {
        let slot = match modal {
            ModalId::Manual => &mut self.manual,
            ModalId::Schema => &mut self.schema,
        };
        let changed = *slot != open;
        *slot = open;
        changed
    }

    /// Modals currently open
    pub fn open_modals(&self) -> impl Iterator<Item = ModalId> + '_ {
        ModalId::ALL.into_iter().filter(|m| self.is_open(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut v = ModalVisibility::default();
        assert!(v.set(ModalId::Manual, true));
        assert!(v.is_open(ModalId::Manual));
        assert!(!v.is_open(ModalId::Schema));
        assert_eq!(v.open_modals().collect::<Vec<_>>(), vec![ModalId::Manual]);
    }

    #[test]
    fn repeated_set_reports_no_change() {
        let mut v = ModalVisibility::default();
        assert!(!v.set(ModalId::Schema, false));
        assert!(v.set(ModalId::Schema, true));
        assert!(!v.set(ModalId::Schema, true));
    }
}
