//! Builds a [`Declaration`] from the derive input.
//!
//! darling parses the shared `#[class(..)]` and `#[member(..)]` attributes;
//! the per-target `#[equatable(..)]` / `#[hashable(..)]` attributes are
//! forwarded and resolved into [`Marker`]s here, so the model never carries
//! raw attributes.

use std::collections::BTreeSet;

use darling::ast::Data;
use darling::util::{Flag, Ignored, PathList, SpannedValue};
use darling::{Error, FromDeriveInput, FromField, FromMeta, Result, error::Accumulator};
use syn::spanned::Spanned;
use syn::{Attribute, DeriveInput, Ident, Type};

use crate::types::{
    AccessorSet, Capability, DeclKind, Declaration, MarkerFlags, Member, MemberName, ScopeKind,
    Visibility,
};

const CAPABILITIES: [Capability; 2] = [Capability::Equatable, Capability::Hashable];

/// Container-level `#[class(..)]` attributes and the struct's fields.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(class), supports(struct_any))]
pub struct ClassInput {
    pub ident: Ident,

    pub vis: syn::Visibility,

    pub generics: syn::Generics,

    pub data: Data<Ignored, ClassField>,

    /// The type is an extension point and must not get synthesized equality.
    #[darling(default)]
    pub open: Flag,

    /// Capabilities the type already implements by hand.
    #[darling(default)]
    pub conforms: PathList,

    /// Computed members backed by getter methods.
    #[darling(multiple)]
    pub computed: Vec<ComputedMember>,
}

/// A struct field and its `#[member(..)]` shape attributes.
#[derive(Debug, FromField)]
#[darling(attributes(member), forward_attrs(equatable, hashable))]
pub struct ClassField {
    pub ident: Option<Ident>,

    pub vis: syn::Visibility,

    /// Only used to place diagnostics on positional fields.
    pub ty: Type,

    pub attrs: Vec<Attribute>,

    /// Never participates, whatever its Rust visibility.
    #[darling(default)]
    pub private: Flag,

    /// Holds state shared by every instance.
    #[darling(default)]
    pub shared: Flag,

    /// Mutations go through observer hooks; storage is unchanged.
    #[darling(default)]
    pub observed: Flag,

    /// Exposed through a getter.
    #[darling(default)]
    pub get: Flag,

    /// Exposed through a setter as well. Requires `get`.
    #[darling(default)]
    pub set: Flag,
}

impl ClassField {
    fn accessors(&self, errors: &mut Accumulator) -> AccessorSet {
        if self.set.is_present() && !self.get.is_present() {
            errors.push(Error::custom("`set` requires `get`").with_span(&self.set.span()));
        }
        if self.observed.is_present() && (self.get.is_present() || self.set.is_present()) {
            errors.push(
                Error::custom("cannot use `observed` together with `get` or `set`")
                    .with_span(&self.observed.span()),
            );
        }

        if self.observed.is_present() {
            AccessorSet::Observers
        } else if self.set.is_present() {
            AccessorSet::GetSet
        } else if self.get.is_present() {
            AccessorSet::GetOnly
        } else {
            AccessorSet::None
        }
    }

    fn into_member(self, index: usize, errors: &mut Accumulator) -> Member {
        let accessors = self.accessors(errors);
        let (name, span) = match &self.ident {
            Some(ident) => (MemberName::Named(ident.clone()), ident.span()),
            None => (MemberName::Positional(index), self.ty.span()),
        };
        let visibility = if self.private.is_present() {
            Visibility::Private
        } else {
            Visibility::from_syn(&self.vis)
        };
        let scope = if self.shared.is_present() {
            ScopeKind::TypeLevel
        } else {
            ScopeKind::Instance
        };

        let mut member = Member::stored(name, visibility, span)
            .with_accessors(accessors)
            .with_scope(scope);
        attach_markers(&mut member, &self.attrs, errors);
        member
    }
}

/// One `computed(..)` entry of `#[class(..)]`.
///
/// ```ignore
/// #[class(computed(names(area), hashable(ignore)))]
/// ```
#[derive(Debug, Clone, FromMeta)]
pub struct ComputedMember {
    /// The getter methods; several names form one co-declared group.
    pub names: SpannedValue<PathList>,

    /// The member also has a setter.
    #[darling(default)]
    pub set: Flag,

    #[darling(default)]
    pub public: Flag,

    #[darling(default)]
    pub private: Flag,

    #[darling(default)]
    pub shared: Flag,

    #[darling(default)]
    pub equatable: Option<MarkerFlags>,

    #[darling(default)]
    pub hashable: Option<MarkerFlags>,
}

impl ComputedMember {
    fn into_member(self, errors: &mut Accumulator) -> Member {
        let span = self.names.span();
        let names = self
            .names
            .iter()
            .filter_map(|path| {
                let ident = path.get_ident().cloned().map(MemberName::Named);
                if ident.is_none() {
                    errors.push(Error::custom("expected a method name").with_span(path));
                }
                ident
            })
            .collect();

        if self.public.is_present() && self.private.is_present() {
            errors.push(
                Error::custom("cannot be both `public` and `private`")
                    .with_span(&self.private.span()),
            );
        }
        let visibility = if self.private.is_present() {
            Visibility::Private
        } else if self.public.is_present() {
            Visibility::Public
        } else {
            Visibility::Internal
        };
        let accessors = if self.set.is_present() {
            AccessorSet::GetSet
        } else {
            AccessorSet::GetOnly
        };
        let scope = if self.shared.is_present() {
            ScopeKind::TypeLevel
        } else {
            ScopeKind::Instance
        };

        let mut member = Member::computed(names, visibility, span)
            .with_accessors(accessors)
            .with_scope(scope);

        let flags = [
            (Capability::Equatable, self.equatable),
            (Capability::Hashable, self.hashable),
        ];
        for (capability, flags) in flags {
            let Some(flags) = flags else { continue };
            if let Some(markers) = errors.handle(flags.markers(capability)) {
                member.markers.extend(markers);
            }
        }

        member
    }
}

fn attach_markers(member: &mut Member, attrs: &[Attribute], errors: &mut Accumulator) {
    for capability in CAPABILITIES {
        let markers = errors
            .handle(MarkerFlags::from_attrs(attrs, capability))
            .and_then(|flags| errors.handle(flags.markers(capability)));
        if let Some(markers) = markers {
            member.markers.extend(markers);
        }
    }
}

impl Declaration {
    /// Builds the model for any derive input.
    ///
    /// Enums and unions become [`DeclKind::Other`] with no members, leaving
    /// the rejection to validation so each derive reports it itself.
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self> {
        if !matches!(input.data, syn::Data::Struct(_)) {
            return Ok(Declaration {
                ident: input.ident.clone(),
                generics: input.generics.clone(),
                kind: DeclKind::Other,
                visibility: Visibility::from_syn(&input.vis),
                conformances: BTreeSet::new(),
                open: false,
                members: Vec::new(),
            });
        }

        let class = ClassInput::from_derive_input(input)?;
        let mut errors = Error::accumulator();

        let Some(fields) = class.data.take_struct() else {
            return Err(Error::custom("expected a struct").with_span(&class.ident));
        };
        let mut members: Vec<Member> = fields
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| field.into_member(index, &mut errors))
            .collect();

        members.extend(
            class
                .computed
                .into_iter()
                .map(|computed| computed.into_member(&mut errors)),
        );

        let conformances = class
            .conforms
            .iter()
            .filter_map(Capability::from_conformance)
            .collect();

        errors.finish_with(Declaration {
            ident: class.ident,
            generics: class.generics,
            kind: DeclKind::Class,
            visibility: Visibility::from_syn(&class.vis),
            conformances,
            open: class.open.is_present(),
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarkerKind, StorageKind};

    fn build(input: DeriveInput) -> Declaration {
        Declaration::from_derive_input(&input).unwrap()
    }

    #[test]
    fn fields_become_stored_members_in_order() {
        let decl = build(syn::parse_quote! {
            pub struct Point {
                pub x: i32,
                y: i32,
                #[member(private)]
                cache: u64,
            }
        });

        assert!(decl.is_class());
        assert!(decl.is_public());
        let names: Vec<_> = decl
            .members
            .iter()
            .map(|m| m.names()[0].to_string())
            .collect();
        assert_eq!(names, ["x", "y", "cache"]);
        assert_eq!(decl.members[0].visibility, Visibility::Public);
        assert_eq!(decl.members[1].visibility, Visibility::Internal);
        assert!(decl.members[2].is_private());
        assert!(decl.members.iter().all(Member::is_stored));
    }

    #[test]
    fn enums_and_unions_are_not_classes() {
        let decl = build(syn::parse_quote! {
            enum Shape { Circle, Square }
        });
        assert_eq!(decl.kind, DeclKind::Other);

        let decl = build(syn::parse_quote! {
            union Bits { a: u32, b: f32 }
        });
        assert_eq!(decl.kind, DeclKind::Other);
    }

    #[test]
    fn member_shapes_map_to_accessor_sets() {
        let decl = build(syn::parse_quote! {
            struct Account {
                #[member(observed)]
                balance: u64,
                #[member(get)]
                owner: String,
                #[member(get, set)]
                nickname: String,
                #[member(shared)]
                registry: &'static str,
            }
        });

        let accessors: Vec<_> = decl.members.iter().map(|m| m.accessors).collect();
        assert_eq!(
            accessors,
            [
                AccessorSet::Observers,
                AccessorSet::GetOnly,
                AccessorSet::GetSet,
                AccessorSet::None
            ]
        );
        assert_eq!(decl.members[3].scope, ScopeKind::TypeLevel);
    }

    #[test]
    fn set_without_get_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Account {
                #[member(set)]
                nickname: String,
            }
        };
        assert!(Declaration::from_derive_input(&input).is_err());
    }

    fn error(input: DeriveInput) -> String {
        Declaration::from_derive_input(&input)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn observed_conflicts_with_accessors() {
        let message = error(syn::parse_quote! {
            struct Account {
                #[member(observed, get)]
                balance: u64,
            }
        });
        assert_eq!(message, "cannot use `observed` together with `get` or `set`");
    }

    #[test]
    fn computed_visibility_must_be_unambiguous() {
        let message = error(syn::parse_quote! {
            #[class(computed(names(a), public, private))]
            struct Rect {
                w: u32,
            }
        });
        assert_eq!(message, "cannot be both `public` and `private`");
    }

    #[test]
    fn computed_visibility_flags() {
        let decl = build(syn::parse_quote! {
            #[class(computed(names(a), public), computed(names(b), private))]
            struct Rect {
                w: u32,
            }
        });
        assert_eq!(decl.members[1].visibility, Visibility::Public);
        assert_eq!(decl.members[2].visibility, Visibility::Private);
    }

    #[test]
    fn computed_members_follow_fields() {
        let decl = build(syn::parse_quote! {
            #[class(computed(names(area)), computed(names(width, height), set, hashable(ignore)))]
            #[class(open, conforms(PartialEq, Clone))]
            struct Rect {
                w: u32,
                h: u32,
            }
        });

        assert!(decl.open);
        assert!(decl.conforms_to(Capability::Equatable));
        assert!(!decl.conforms_to(Capability::Hashable));
        assert_eq!(decl.members.len(), 4);

        let area = &decl.members[2];
        assert_eq!(area.storage, StorageKind::Computed);
        assert_eq!(area.accessors, AccessorSet::GetOnly);

        let group = &decl.members[3];
        assert_eq!(group.names().len(), 2);
        assert_eq!(group.accessors, AccessorSet::GetSet);
        assert!(group.has_marker(Capability::Hashable, MarkerKind::Ignore));
        assert!(!group.has_marker(Capability::Equatable, MarkerKind::Ignore));
    }

    #[test]
    fn tuple_fields_are_positional() {
        let decl = build(syn::parse_quote! {
            struct Pair(u32, #[hashable(unique)] String);
        });

        assert_eq!(decl.members[0].names(), [MemberName::Positional(0)]);
        assert_eq!(decl.members[1].names(), [MemberName::Positional(1)]);
        assert!(decl.members[1].has_marker(Capability::Hashable, MarkerKind::Unique));
    }
}
