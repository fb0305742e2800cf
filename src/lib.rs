//! # equatable-derive
//!
//! Derives structural equality and hashing for structs, with control over
//! which members take part.
//!
//! ## Features
//!
//! - **Ignore members**: `#[equatable(ignore)]` / `#[hashable(ignore)]`
//! - **Unique members**: `#[equatable(unique)]` / `#[hashable(unique)]` narrow
//!   the comparison to the marked members only
//! - **Computed members**: `#[class(computed(names(area)))]` declares getter
//!   methods, compared when `include_computed` is set
//! - **Member shapes**: `#[member(private)]`, `#[member(shared)]`,
//!   `#[member(observed)]`, `#[member(get)]`, `#[member(get, set)]`
//! - **Existing impls**: `#[class(conforms(PartialEq, Hash))]` generates only
//!   the inherent functions
//!
//! ## Example
//!
//! ```rust
//! use equatable_derive::{Equatable, Hashable};
//!
//! #[derive(Equatable, Hashable)]
//! struct Player {
//!     name: String,
//!     #[equatable(ignore)]
//!     #[hashable(ignore)]
//!     last_seen: u64,
//! }
//! ```
//!
//! This generates `Player::equals` and `Player::hash_into`, comparing and
//! hashing `name` only, plus `PartialEq`, `Eq` and `Hash` impls calling them.
//!
//! ## Participation rules
//!
//! A member takes part in a target when all of these hold:
//!
//! - it belongs to the instance (not `#[member(shared)]`);
//! - it is not `#[member(private)]`, and it is `pub` if the type is `pub`
//!   (override with `public_only = false`);
//! - it is plain or `observed` storage, or `include_computed` is set and it
//!   is a getter-backed member;
//! - it carries no `ignore` marker for the target;
//! - when any eligible member carries `unique`, it carries `unique` too.
//!
//! Equality and hashing are resolved independently. Keep the hashed members
//! a subset of the compared ones, or equal values may hash differently.
//!
//! Generic parameters get no added bounds: the generated impls reuse the
//! declaration's own generics and where clause.

mod analyze;
mod error;
mod expand;
mod synth;
mod types;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use crate::expand::expand_derive;
use crate::types::Capability;

/// Derives structural equality.
///
/// Generates an inherent `fn equals(lhs: &Self, rhs: &Self) -> bool`
/// conjoining `==` over the participating members in declaration order
/// (`true` when there are none), plus `PartialEq` and `Eq` impls calling it.
/// The function is `pub` when the type is.
///
/// # Struct-Level Attributes
///
/// - `#[equatable(include_computed)]` — Compare getter-backed members
/// - `#[equatable(public_only = false)]` — Admit non-`pub` members of a `pub` type
/// - `#[equatable(skip_eq)]` — Do not implement `Eq`
/// - `#[equatable(debug)]` — Print the generated code while compiling
/// - `#[class(open)]` — Declare the type open; the derive refuses it
/// - `#[class(conforms(PartialEq))]` — The type implements `PartialEq` itself
/// - `#[class(computed(names(a, b), set, public, private, shared, equatable(..)))]`
///
/// # Field-Level Attributes
///
/// - `#[equatable(ignore)]` — Never compare this member
/// - `#[equatable(unique)]` — Compare only members marked `unique`
/// - `#[member(private | shared | observed | get | set)]` — Member shape
///
/// # Example
///
/// ```rust
/// use equatable_derive::Equatable;
///
/// #[derive(Equatable)]
/// #[equatable(include_computed)]
/// #[class(computed(names(area)))]
/// struct Rect {
///     #[equatable(ignore)]
///     w: u32,
///     #[equatable(ignore)]
///     h: u32,
/// }
///
/// impl Rect {
///     fn area(&self) -> u32 {
///         self.w * self.h
///     }
/// }
///
/// assert!(Rect { w: 2, h: 3 } == Rect { w: 3, h: 2 });
/// ```
#[proc_macro_derive(Equatable, attributes(class, member, equatable))]
pub fn equatable_derive(input: TokenStream) -> TokenStream {
    derive(input, Capability::Equatable)
}

/// Derives hashing.
///
/// Generates an inherent `fn hash_into<H: Hasher>(&self, state: &mut H)`
/// feeding every participating member into `state` in declaration order,
/// plus a `Hash` impl calling it. Attributes mirror `Equatable` under the
/// `hashable` name; `skip_eq` does not apply.
///
/// # Example
///
/// ```rust
/// use equatable_derive::{Equatable, Hashable};
///
/// #[derive(Equatable, Hashable)]
/// struct Session {
///     #[equatable(unique)]
///     #[hashable(unique)]
///     id: u64,
///     retries: u32,
/// }
/// ```
#[proc_macro_derive(Hashable, attributes(class, member, hashable))]
pub fn hashable_derive(input: TokenStream) -> TokenStream {
    derive(input, Capability::Hashable)
}

fn derive(input: TokenStream, capability: Capability) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_derive(&input, capability) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
