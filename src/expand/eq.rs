//! `PartialEq` / `Eq` emission.

use proc_macro2::TokenStream;
use quote::quote;

use crate::expand::common::{allow_unused, read, visibility};
use crate::synth::{EqualityExpr, EqualityFragment};
use crate::types::{Declaration, TargetOptions};

/// Emits the inherent `equals` function and, unless the type already
/// implements equality, the `PartialEq` and `Eq` impls delegating to it.
pub fn expand_equality(
    declaration: &Declaration,
    fragment: &EqualityFragment,
    options: &TargetOptions,
) -> TokenStream {
    let name = &declaration.ident;
    let (impl_generics, ty_generics, where_clause) = declaration.generics.split_for_impl();

    let vis = visibility(fragment.visibility);
    let allow = allow_unused(fragment.body.participants().is_empty());
    let body = build_expr(&fragment.body);

    let mut output = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #[inline]
            #allow
            #vis fn equals(lhs: &Self, rhs: &Self) -> bool {
                #body
            }
        }
    };

    if !fragment.declare_conformance {
        return output;
    }

    output.extend(quote! {
        #[automatically_derived]
        impl #impl_generics ::core::cmp::PartialEq for #name #ty_generics #where_clause {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                Self::equals(self, other)
            }
        }
    });

    if !options.skip_eq.is_present() {
        output.extend(quote! {
            #[automatically_derived]
            impl #impl_generics ::core::cmp::Eq for #name #ty_generics #where_clause {}
        });
    }

    output
}

fn build_expr(expr: &EqualityExpr) -> TokenStream {
    match expr {
        EqualityExpr::Literal(value) => quote! { #value },
        EqualityExpr::MemberEq(participant) => {
            let lhs = read(&quote! { lhs }, participant);
            let rhs = read(&quote! { rhs }, participant);
            quote! { #lhs == #rhs }
        }
        EqualityExpr::And(lhs, rhs) => {
            let lhs = build_expr(lhs);
            let rhs = build_expr(rhs);
            quote! { #lhs && #rhs }
        }
    }
}
