//! Builds the generated routines as plain data.
//!
//! The synthesizer decides *what* to generate: the comparison expression
//! tree, the hash statement list, the visibility of the generated function
//! and whether the trait impls are needed. Turning that into tokens is left
//! to [`crate::expand`].

use crate::analyze::Participant;
use crate::types::{Capability, Declaration, Visibility};

/// A boolean expression over two instances `lhs` and `rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualityExpr {
    Literal(bool),
    /// `lhs.name == rhs.name`
    MemberEq(Participant),
    /// Short-circuiting conjunction, left operand first.
    And(Box<EqualityExpr>, Box<EqualityExpr>),
}

impl EqualityExpr {
    /// Left-folds the member tests of `participants`; no participants yields
    /// `true`.
    pub fn conjunction(participants: impl IntoIterator<Item = Participant>) -> Self {
        let mut iter = participants.into_iter().map(EqualityExpr::MemberEq);
        let Some(first) = iter.next() else {
            return EqualityExpr::Literal(true);
        };
        iter.fold(first, |acc, test| {
            EqualityExpr::And(Box::new(acc), Box::new(test))
        })
    }

    /// The compared participants in evaluation order.
    pub fn participants(&self) -> Vec<&Participant> {
        match self {
            EqualityExpr::Literal(_) => Vec::new(),
            EqualityExpr::MemberEq(participant) => vec![participant],
            EqualityExpr::And(lhs, rhs) => {
                let mut out = lhs.participants();
                out.extend(rhs.participants());
                out
            }
        }
    }
}

/// One statement of the generated hash body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashStmt {
    /// Feeds the participant's value into the caller's hasher.
    Combine(Participant),
}

/// Visibility qualifier of a generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnVisibility {
    Public,
    /// No qualifier.
    Inherited,
}

impl FnVisibility {
    fn of(declaration: &Declaration) -> Self {
        match declaration.visibility {
            Visibility::Public => FnVisibility::Public,
            Visibility::Internal | Visibility::Private => FnVisibility::Inherited,
        }
    }
}

/// The generated equality routine.
#[derive(Debug, Clone)]
pub struct EqualityFragment {
    /// Emit the `PartialEq` (and `Eq`) impls; false when the type already
    /// implements equality by hand.
    pub declare_conformance: bool,
    pub visibility: FnVisibility,
    pub body: EqualityExpr,
}

/// The generated hashing routine.
#[derive(Debug, Clone)]
pub struct HashingFragment {
    /// Emit the `Hash` impl; false when the type already implements it.
    pub declare_conformance: bool,
    pub visibility: FnVisibility,
    pub body: Vec<HashStmt>,
}

pub fn synthesize_equality(
    declaration: &Declaration,
    participants: Vec<Participant>,
) -> EqualityFragment {
    EqualityFragment {
        declare_conformance: !declaration.conforms_to(Capability::Equatable),
        visibility: FnVisibility::of(declaration),
        body: EqualityExpr::conjunction(participants),
    }
}

// Whether hashing only reads what equality compares is up to the caller; the
// two participant lists are resolved independently.
pub fn synthesize_hashing(
    declaration: &Declaration,
    participants: Vec<Participant>,
) -> HashingFragment {
    HashingFragment {
        declare_conformance: !declaration.conforms_to(Capability::Hashable),
        visibility: FnVisibility::of(declaration),
        body: participants.into_iter().map(HashStmt::Combine).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Access;
    use crate::types::MemberName;
    use quote::format_ident;

    fn field(name: &str) -> Participant {
        Participant {
            name: MemberName::Named(format_ident!("{}", name)),
            access: Access::Field,
        }
    }

    fn point() -> Declaration {
        Declaration::class(format_ident!("Point"), Visibility::Internal)
    }

    #[test]
    fn empty_equality_is_always_true() {
        let fragment = synthesize_equality(&point(), Vec::new());
        assert_eq!(fragment.body, EqualityExpr::Literal(true));
        assert!(fragment.body.participants().is_empty());
    }

    #[test]
    fn conjunction_is_left_folded_in_order() {
        let fragment = synthesize_equality(&point(), vec![field("x"), field("y"), field("z")]);

        let EqualityExpr::And(lhs, rhs) = &fragment.body else {
            panic!("expected a conjunction, got {:?}", fragment.body);
        };
        assert_eq!(**rhs, EqualityExpr::MemberEq(field("z")));
        assert_eq!(
            **lhs,
            EqualityExpr::And(
                Box::new(EqualityExpr::MemberEq(field("x"))),
                Box::new(EqualityExpr::MemberEq(field("y")))
            )
        );

        let order: Vec<_> = fragment
            .body
            .participants()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(order, ["x", "y", "z"]);
    }

    #[test]
    fn single_participant_is_a_bare_test() {
        let fragment = synthesize_equality(&point(), vec![field("x")]);
        assert_eq!(fragment.body, EqualityExpr::MemberEq(field("x")));
    }

    #[test]
    fn hashing_combines_each_participant_once() {
        let fragment = synthesize_hashing(&point(), vec![field("x"), field("y")]);
        assert_eq!(
            fragment.body,
            [HashStmt::Combine(field("x")), HashStmt::Combine(field("y"))]
        );

        let fragment = synthesize_hashing(&point(), Vec::new());
        assert!(fragment.body.is_empty());
    }

    #[test]
    fn existing_conformance_is_not_redeclared() {
        let mut decl = point();
        assert!(synthesize_equality(&decl, Vec::new()).declare_conformance);
        assert!(synthesize_hashing(&decl, Vec::new()).declare_conformance);

        decl.conformances.insert(Capability::Equatable);
        assert!(!synthesize_equality(&decl, Vec::new()).declare_conformance);
        assert!(synthesize_hashing(&decl, Vec::new()).declare_conformance);

        decl.conformances.insert(Capability::Hashable);
        assert!(!synthesize_hashing(&decl, Vec::new()).declare_conformance);
    }

    #[test]
    fn function_visibility_mirrors_the_type() {
        let public = Declaration::class(format_ident!("Point"), Visibility::Public);
        assert_eq!(
            synthesize_equality(&public, Vec::new()).visibility,
            FnVisibility::Public
        );
        assert_eq!(
            synthesize_hashing(&point(), Vec::new()).visibility,
            FnVisibility::Inherited
        );
    }
}
