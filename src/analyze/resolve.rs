use std::collections::HashSet;

use crate::analyze::classify;
use crate::error::SynthesisError;
use crate::types::{Capability, MarkerKind, Member, MemberName, Policy};

/// How generated code reads a participant's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `value.name`
    Field,
    /// `value.name()`
    Getter,
}

/// A single name taking part in equality or hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: MemberName,
    pub access: Access,
}

impl Policy {
    /// Visibility filter: private members never qualify, internal ones only
    /// when public members aren't required.
    pub fn admits(&self, member: &Member) -> bool {
        !member.is_private() && (member.is_public() || !self.require_public)
    }
}

/// Produces the ordered participants of `members` for one synthesis target.
pub fn resolve_participants(
    members: &[Member],
    policy: Policy,
    capability: Capability,
) -> Result<Vec<Participant>, SynthesisError> {
    check_bindings(members)?;

    let eligible: Vec<&Member> = members
        .iter()
        .filter(|member| policy.admits(member))
        .filter(|member| classify(member, policy.include_computed))
        .filter(|member| !member.has_marker(capability, MarkerKind::Ignore))
        .collect();

    let narrowed = eligible
        .iter()
        .any(|member| member.has_marker(capability, MarkerKind::Unique));

    let participants = eligible
        .into_iter()
        .filter(|member| !narrowed || member.has_marker(capability, MarkerKind::Unique))
        .flat_map(|member| {
            let access = if member.is_stored() {
                Access::Field
            } else {
                Access::Getter
            };
            member.names().iter().map(move |name| Participant {
                name: name.clone(),
                access,
            })
        })
        .collect();

    Ok(participants)
}

/// Every member must introduce at least one name, and no name may be
/// introduced twice.
fn check_bindings(members: &[Member]) -> Result<(), SynthesisError> {
    let mut seen = HashSet::new();

    for member in members {
        if member.names().is_empty() {
            return Err(SynthesisError::MultipleBindings { span: member.span });
        }
        for name in member.names() {
            if !seen.insert(name.to_string()) {
                return Err(SynthesisError::MultipleBindings { span: member.span });
            }
        }
    }

    Ok(())
}
