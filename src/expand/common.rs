//! Helpers shared by the equality and hashing emitters.

use proc_macro2::TokenStream;
use quote::quote;

use crate::analyze::{Access, Participant};
use crate::synth::FnVisibility;
use crate::types::{Capability, Declaration};

/// Reads `participant` from the instance expression `base`.
pub fn read(base: &TokenStream, participant: &Participant) -> TokenStream {
    let name = &participant.name;
    match participant.access {
        Access::Field => quote! { #base.#name },
        Access::Getter => quote! { #base.#name() },
    }
}

pub fn visibility(vis: FnVisibility) -> TokenStream {
    match vis {
        FnVisibility::Public => quote! { pub },
        FnVisibility::Inherited => TokenStream::new(),
    }
}

/// Silences unused parameters of a generated function with an empty body.
pub fn allow_unused(empty: bool) -> TokenStream {
    if empty {
        quote! { #[allow(unused_variables)] }
    } else {
        TokenStream::new()
    }
}

/// Writes the generated items to stderr, framed so several dumps in one
/// build stay readable.
pub fn dump(capability: Capability, declaration: &Declaration, output: &TokenStream) {
    let description = format!("{} for {}", capability.derive_name(), declaration.ident);
    eprintln!("---------- expansion of {description} (start) ----------");
    eprintln!("{output}");
    eprintln!("---------- expansion of {description} (end) ----------");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberName;
    use quote::format_ident;

    #[test]
    fn getters_are_called() {
        let participant = Participant {
            name: MemberName::Named(format_ident!("area")),
            access: Access::Getter,
        };
        assert_eq!(
            read(&quote!(lhs), &participant).to_string(),
            quote!(lhs.area()).to_string()
        );
    }

    #[test]
    fn fields_are_read_directly() {
        let participant = Participant {
            name: MemberName::Positional(0),
            access: Access::Field,
        };
        assert_eq!(
            read(&quote!(self), &participant).to_string(),
            quote!(self.0).to_string()
        );
    }
}
