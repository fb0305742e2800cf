pub mod declaration;
pub mod input;
pub mod markers;
pub mod options;

pub use declaration::{
    AccessorSet, DeclKind, Declaration, Member, MemberName, ScopeKind, StorageKind, Visibility,
};
pub use markers::{Capability, Marker, MarkerFlags, MarkerKind};
pub use options::{Policy, TargetOptions};
