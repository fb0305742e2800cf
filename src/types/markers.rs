use darling::util::Flag;
use darling::{Error, FromMeta, Result};
use syn::{Attribute, Path};

/// A synthesis target. Each derive synthesizes exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Structural equality (`PartialEq` + `Eq`).
    Equatable,
    /// Hash combination (`Hash`).
    Hashable,
}

impl Capability {
    /// The helper attribute carrying this target's options and markers.
    pub fn attr_name(self) -> &'static str {
        match self {
            Capability::Equatable => "equatable",
            Capability::Hashable => "hashable",
        }
    }

    pub fn derive_name(self) -> &'static str {
        match self {
            Capability::Equatable => "Equatable",
            Capability::Hashable => "Hashable",
        }
    }

    /// Recognizes a conformance listed in `#[class(conforms(..))]`.
    ///
    /// Paths naming anything else are not ours to track and yield `None`.
    pub fn from_conformance(path: &Path) -> Option<Self> {
        let ident = &path.segments.last()?.ident;
        match ident.to_string().as_str() {
            "PartialEq" | "Equatable" => Some(Capability::Equatable),
            "Hash" | "Hashable" => Some(Capability::Hashable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerKind {
    /// Hard exclusion.
    Ignore,
    /// Narrows the participants to unique-marked members.
    Unique,
}

/// A marker attached to a member for one synthesis target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Marker {
    pub capability: Capability,
    pub kind: MarkerKind,
}

/// The body of `#[equatable(..)]` / `#[hashable(..)]` on a member.
#[derive(Debug, Clone, Default, FromMeta)]
pub struct MarkerFlags {
    #[darling(default)]
    pub ignore: Flag,

    #[darling(default)]
    pub unique: Flag,
}

impl MarkerFlags {
    /// Collects every marker attribute for `capability` among `attrs`.
    pub fn from_attrs(attrs: &[Attribute], capability: Capability) -> Result<Self> {
        let mut flags = MarkerFlags::default();
        let mut errors = Error::accumulator();

        for attr in attrs
            .iter()
            .filter(|attr| attr.path().is_ident(capability.attr_name()))
        {
            if let Some(parsed) = errors.handle(MarkerFlags::from_meta(&attr.meta)) {
                flags.merge(parsed);
            }
        }

        errors.finish_with(flags)
    }

    fn merge(&mut self, other: MarkerFlags) {
        if other.ignore.is_present() {
            self.ignore = other.ignore;
        }
        if other.unique.is_present() {
            self.unique = other.unique;
        }
    }

    /// Resolves the flags into markers, rejecting `ignore` combined with `unique`.
    pub fn markers(&self, capability: Capability) -> Result<Vec<Marker>> {
        if self.ignore.is_present() && self.unique.is_present() {
            return Err(Error::custom("cannot use `unique` on ignored members")
                .with_span(&self.unique.span()));
        }

        let kinds = [
            (MarkerKind::Ignore, self.ignore.is_present()),
            (MarkerKind::Unique, self.unique.is_present()),
        ];

        Ok(kinds
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(kind, _)| Marker { capability, kind })
            .collect())
    }
}
