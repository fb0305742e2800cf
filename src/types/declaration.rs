//! The declaration model the analyzer works on.
//!
//! A [`Declaration`] is an immutable snapshot built once per derive
//! invocation. Everything the classifier, resolver and synthesizer need to
//! know about a member is answered by the accessors here, so none of them
//! look at `syn` attributes directly.

use std::collections::BTreeSet;
use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Generics, Ident};

use crate::types::{Capability, Marker, MarkerKind};

/// Whether the annotated item is something equality can be synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// A struct with named, positional or no fields.
    Class,
    /// An enum or union.
    Other,
}

/// Visibility levels, ordered from most to least restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Private,
    Internal,
    Public,
}

impl Visibility {
    /// Maps a Rust visibility onto the model. Only `pub` is public; every
    /// restricted form collapses to internal.
    pub fn from_syn(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => Visibility::Public,
            syn::Visibility::Restricted(_) | syn::Visibility::Inherited => Visibility::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Backed by memory in the instance.
    Stored,
    /// Derived from a getter on every access.
    Computed,
}

/// The accessors a member exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorSet {
    /// Plain storage.
    None,
    /// Mutation hooks that leave the storage itself untouched.
    Observers,
    GetOnly,
    GetSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Instance,
    /// Shared by every instance of the type.
    TypeLevel,
}

/// The name a single binding introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberName {
    Named(Ident),
    /// A tuple-struct field.
    Positional(usize),
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberName::Named(ident) => write!(f, "{ident}"),
            MemberName::Positional(index) => write!(f, "{index}"),
        }
    }
}

impl ToTokens for MemberName {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            MemberName::Named(ident) => ident.to_tokens(tokens),
            MemberName::Positional(index) => {
                let index = syn::Index::from(*index);
                tokens.extend(quote! { #index });
            }
        }
    }
}

/// How a member declaration introduces its names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingShape {
    Single(MemberName),
    /// Several names co-declared under one set of attributes.
    Group(Vec<MemberName>),
}

impl BindingShape {
    /// The introduced names, left to right.
    pub fn names(&self) -> &[MemberName] {
        match self {
            BindingShape::Single(name) => std::slice::from_ref(name),
            BindingShape::Group(names) => names,
        }
    }
}

/// One declared field or computed property.
#[derive(Debug, Clone)]
pub struct Member {
    pub binding: BindingShape,
    pub storage: StorageKind,
    pub accessors: AccessorSet,
    pub scope: ScopeKind,
    pub visibility: Visibility,
    pub markers: BTreeSet<Marker>,
    pub span: Span,
}

impl Member {
    /// A plain instance field with no accessors or markers.
    pub fn stored(name: MemberName, visibility: Visibility, span: Span) -> Self {
        Self {
            binding: BindingShape::Single(name),
            storage: StorageKind::Stored,
            accessors: AccessorSet::None,
            scope: ScopeKind::Instance,
            visibility,
            markers: BTreeSet::new(),
            span,
        }
    }

    /// A get-only computed member. Groups of more than one name become a
    /// [`BindingShape::Group`].
    pub fn computed(names: Vec<MemberName>, visibility: Visibility, span: Span) -> Self {
        let binding = match <[MemberName; 1]>::try_from(names) {
            Ok([name]) => BindingShape::Single(name),
            Err(names) => BindingShape::Group(names),
        };

        Self {
            binding,
            storage: StorageKind::Computed,
            accessors: AccessorSet::GetOnly,
            scope: ScopeKind::Instance,
            visibility,
            markers: BTreeSet::new(),
            span,
        }
    }

    pub fn with_accessors(mut self, accessors: AccessorSet) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn with_scope(mut self, scope: ScopeKind) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_stored(&self) -> bool {
        self.storage == StorageKind::Stored
    }

    pub fn is_instance(&self) -> bool {
        self.scope == ScopeKind::Instance
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn has_marker(&self, capability: Capability, kind: MarkerKind) -> bool {
        self.markers.contains(&Marker { capability, kind })
    }

    pub fn names(&self) -> &[MemberName] {
        self.binding.names()
    }
}

/// The annotated type.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub ident: Ident,
    pub generics: Generics,
    pub kind: DeclKind,
    pub visibility: Visibility,
    /// Capabilities the type already implements by hand.
    pub conformances: BTreeSet<Capability>,
    /// The type is declared as an extension point other code may override.
    pub open: bool,
    pub members: Vec<Member>,
}

impl Declaration {
    pub fn is_class(&self) -> bool {
        self.kind == DeclKind::Class
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn conforms_to(&self, capability: Capability) -> bool {
        self.conformances.contains(&capability)
    }

    pub fn span(&self) -> Span {
        self.ident.span()
    }
}

/// Hand-built models for unit tests.
#[cfg(test)]
impl Member {
    pub fn with_marker(mut self, capability: Capability, kind: MarkerKind) -> Self {
        self.markers.insert(Marker { capability, kind });
        self
    }
}

#[cfg(test)]
impl Declaration {
    /// An empty struct declaration.
    pub fn class(ident: Ident, visibility: Visibility) -> Self {
        Self {
            ident,
            generics: Generics::default(),
            kind: DeclKind::Class,
            visibility,
            conformances: BTreeSet::new(),
            open: false,
            members: Vec::new(),
        }
    }
}
