//! Code generation for the `Equatable` and `Hashable` derives.

mod common;
mod eq;
mod hash;

use darling::Result;
use proc_macro2::TokenStream;
use syn::DeriveInput;

use crate::analyze;
use crate::synth::{synthesize_equality, synthesize_hashing};
use crate::types::{Capability, Declaration, TargetOptions};

/// Expands one derive: builds and validates the model, resolves
/// participants for `capability` and emits the generated items.
///
/// Validation runs before the target options are read, so a non-struct
/// reports its shape rather than a bad option.
pub fn expand_derive(input: &DeriveInput, capability: Capability) -> Result<TokenStream> {
    let declaration = Declaration::from_derive_input(input)?;
    analyze::validate(&declaration)?;

    let options = TargetOptions::from_attrs(&input.attrs, capability)?;
    let policy = options.policy(&declaration);
    let participants = analyze::resolve_participants(&declaration.members, policy, capability)?;

    let output = match capability {
        Capability::Equatable => {
            let fragment = synthesize_equality(&declaration, participants);
            eq::expand_equality(&declaration, &fragment, &options)
        }
        Capability::Hashable => {
            let fragment = synthesize_hashing(&declaration, participants);
            hash::expand_hashing(&declaration, &fragment)
        }
    };

    if options.debug.is_present() {
        common::dump(capability, &declaration, &output);
    }

    Ok(output)
}
