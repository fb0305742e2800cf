use darling::ast::NestedMeta;
use darling::util::Flag;
use darling::{Error, FromMeta, Result};
use syn::{Attribute, Meta};

use crate::types::{Capability, Declaration};

/// Container options for one synthesis target, read from
/// `#[equatable(..)]` or `#[hashable(..)]` on the type.
#[derive(Debug, Default, FromMeta)]
pub struct TargetOptions {
    /// Admit get/set-backed members as participants.
    #[darling(default)]
    pub include_computed: bool,

    /// Overrides whether only `pub` members participate. Defaults to whether
    /// the type itself is `pub`.
    #[darling(default)]
    pub public_only: Option<bool>,

    /// Skip the `Eq` marker impl (equality only).
    #[darling(default)]
    pub skip_eq: Flag,

    /// Print the generated code to stderr.
    #[darling(default)]
    pub debug: Flag,
}

impl TargetOptions {
    /// Parses all container attributes for `capability`, treating several
    /// attributes as one list.
    pub fn from_attrs(attrs: &[Attribute], capability: Capability) -> Result<Self> {
        let mut items = Vec::new();

        for attr in attrs
            .iter()
            .filter(|attr| attr.path().is_ident(capability.attr_name()))
        {
            match &attr.meta {
                Meta::List(list) => items.extend(NestedMeta::parse_meta_list(list.tokens.clone())?),
                Meta::Path(_) => {}
                Meta::NameValue(_) => {
                    return Err(Error::unsupported_format("name-value").with_span(attr));
                }
            }
        }

        let options = TargetOptions::from_list(&items)?;
        options.validate(capability)
    }

    fn validate(self, capability: Capability) -> Result<Self> {
        if capability != Capability::Equatable && self.skip_eq.is_present() {
            return Err(Error::custom(format!(
                "`skip_eq` has no meaning for `{}`",
                capability.derive_name()
            ))
            .with_span(&self.skip_eq.span()));
        }

        Ok(self)
    }

    /// The eligibility policy for `declaration` under these options.
    pub fn policy(&self, declaration: &Declaration) -> Policy {
        Policy {
            include_computed: self.include_computed,
            require_public: self.public_only.unwrap_or_else(|| declaration.is_public()),
        }
    }
}

/// Which members are eligible to participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    pub include_computed: bool,
    pub require_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Visibility;
    use quote::format_ident;

    #[test]
    fn options_merge_across_attributes() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[equatable(include_computed)]),
            syn::parse_quote!(#[equatable(skip_eq)]),
            syn::parse_quote!(#[hashable(debug)]),
        ];

        let options = TargetOptions::from_attrs(&attrs, Capability::Equatable).unwrap();
        assert!(options.include_computed);
        assert!(options.skip_eq.is_present());
        assert!(!options.debug.is_present());
    }

    #[test]
    fn skip_eq_is_rejected_for_hashing() {
        let attrs: Vec<Attribute> = vec![syn::parse_quote!(#[hashable(skip_eq)])];
        assert!(TargetOptions::from_attrs(&attrs, Capability::Hashable).is_err());
    }

    #[test]
    fn public_types_require_public_members_by_default() {
        let public = Declaration::class(format_ident!("Point"), Visibility::Public);
        let internal = Declaration::class(format_ident!("Point"), Visibility::Internal);

        let options = TargetOptions::default();
        assert!(options.policy(&public).require_public);
        assert!(!options.policy(&internal).require_public);

        let attrs: Vec<Attribute> = vec![syn::parse_quote!(#[equatable(public_only = false)])];
        let options = TargetOptions::from_attrs(&attrs, Capability::Equatable).unwrap();
        assert!(!options.policy(&public).require_public);
    }
}
