//! `Hash` emission.

use proc_macro2::TokenStream;
use quote::quote;

use crate::expand::common::{allow_unused, read, visibility};
use crate::synth::{HashStmt, HashingFragment};
use crate::types::Declaration;

/// Emits the inherent `hash_into` function and, unless the type already
/// implements hashing, a `Hash` impl delegating to it.
pub fn expand_hashing(declaration: &Declaration, fragment: &HashingFragment) -> TokenStream {
    let name = &declaration.ident;
    let (impl_generics, ty_generics, where_clause) = declaration.generics.split_for_impl();

    let vis = visibility(fragment.visibility);
    let allow = allow_unused(fragment.body.is_empty());
    let stmts = fragment.body.iter().map(build_stmt);

    let mut output = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #[inline]
            #allow
            #vis fn hash_into<__H: ::core::hash::Hasher>(&self, state: &mut __H) {
                #(#stmts)*
            }
        }
    };

    if fragment.declare_conformance {
        output.extend(quote! {
            #[automatically_derived]
            impl #impl_generics ::core::hash::Hash for #name #ty_generics #where_clause {
                #[inline]
                fn hash<__H: ::core::hash::Hasher>(&self, state: &mut __H) {
                    Self::hash_into(self, state)
                }
            }
        });
    }

    output
}

fn build_stmt(stmt: &HashStmt) -> TokenStream {
    match stmt {
        HashStmt::Combine(participant) => {
            let value = read(&quote! { self }, participant);
            quote! { ::core::hash::Hash::hash(&#value, state); }
        }
    }
}
