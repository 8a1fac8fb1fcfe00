//! The computed capability set applied to a request.

use serde::{Deserialize, Serialize};

use super::action::PermissionAction;

/// Effective capability flags for one (user, module) pair.
///
/// This value is computed per request by the permission resolver and never
/// stored. `PermissionSet::none()` is the fail-safe result when neither an
/// override nor a role default exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// Read records.
    pub view: bool,
    /// Create records.
    pub create: bool,
    /// Modify records.
    pub edit: bool,
    /// Remove records.
    pub delete: bool,
    /// Approve records.
    pub approve: bool,
}

impl PermissionSet {
    /// The all-false set: no access.
    pub fn none() -> Self {
        Self::default()
    }

    /// Construct a set from the five flags in declaration order.
    pub fn new(view: bool, create: bool, edit: bool, delete: bool, approve: bool) -> Self {
        Self {
            view,
            create,
            edit,
            delete,
            approve,
        }
    }

    /// Check whether the set grants the given action.
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.view,
            PermissionAction::Create => self.create,
            PermissionAction::Edit => self.edit,
            PermissionAction::Delete => self.delete,
            PermissionAction::Approve => self.approve,
        }
    }

    /// Check whether the set grants nothing at all.
    pub fn is_empty(&self) -> bool {
        !(self.view || self.create || self.edit || self.delete || self.approve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_denies_everything() {
        let set = PermissionSet::none();
        for action in [
            PermissionAction::View,
            PermissionAction::Create,
            PermissionAction::Edit,
            PermissionAction::Delete,
            PermissionAction::Approve,
        ] {
            assert!(!set.allows(action));
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let set = PermissionSet::new(false, false, false, false, true);
        assert!(set.allows(PermissionAction::Approve));
        assert!(!set.allows(PermissionAction::View));
        assert!(!set.is_empty());
    }
}
