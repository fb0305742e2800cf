use crate::types::{AccessorSet, Member, StorageKind};

/// Decides from a member's shape alone whether it can participate.
///
/// Visibility and markers are applied later by the resolver.
pub fn classify(member: &Member, include_computed: bool) -> bool {
    if !member.is_instance() {
        return false;
    }

    match (member.storage, member.accessors) {
        (StorageKind::Stored, AccessorSet::None | AccessorSet::Observers) => true,
        (StorageKind::Stored, AccessorSet::GetOnly | AccessorSet::GetSet) => include_computed,
        (StorageKind::Computed, AccessorSet::GetOnly) => include_computed,
        (StorageKind::Computed, AccessorSet::None | AccessorSet::Observers | AccessorSet::GetSet) => {
            false
        }
    }
}
