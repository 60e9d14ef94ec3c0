//! Identity, naming and versioning of artefacts
//!
//! Artefact attributes are small composable structs. Each capability is a
//! trait with default methods, so a type only supplies accessors for the
//! structs it actually owns:
//!
//! - [`Identifiable`]: id, URN/URI and annotations
//! - [`Nameable`]: localised names and descriptions
//! - [`Versionable`]: version and validity window
//! - [`Maintainable`]: maintenance agency and the compound key
//!   `{agency, id, version}`

use super::reference::{Reference, versions_match};
use crate::text::{self, DisplayOptions, LocalisedText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Free-form annotation attached to any identifiable artefact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,
    #[serde(default)]
    pub texts: Vec<LocalisedText>,
}

/// Identity attributes shared by every artefact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiableArtefact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl IdentifiableArtefact {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }
}

/// Identity plus localised names and descriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameableArtefact {
    #[serde(flatten)]
    pub identity: IdentifiableArtefact,
    #[serde(default)]
    pub names: Vec<LocalisedText>,
    #[serde(default)]
    pub descriptions: Vec<LocalisedText>,
}

impl NameableArtefact {
    pub fn new(id: &str) -> Self {
        Self {
            identity: IdentifiableArtefact::new(id),
            ..Self::default()
        }
    }

    /// Add a name in the given language
    pub fn with_name(mut self, lang: &str, text: &str) -> Self {
        self.names.push(LocalisedText::new(lang, text));
        self
    }

    /// Add a description in the given language
    pub fn with_description(mut self, lang: &str, text: &str) -> Self {
        self.descriptions.push(LocalisedText::new(lang, text));
        self
    }
}

/// Header of a maintainable artefact: naming, version and agency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintainableArtefact {
    #[serde(flatten)]
    pub nameable: NameableArtefact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_external_reference: bool,
}

impl MaintainableArtefact {
    pub fn new(agency_id: &str, id: &str, version: Option<&str>) -> Self {
        Self {
            nameable: NameableArtefact::new(id),
            version: version.map(str::to_string),
            agency_id: Some(agency_id.to_string()),
            ..Self::default()
        }
    }

    /// Add a name in the given language
    pub fn with_name(mut self, lang: &str, text: &str) -> Self {
        self.nameable = self.nameable.with_name(lang, text);
        self
    }
}

/// An artefact with an id
pub trait Identifiable {
    fn identifiable(&self) -> &IdentifiableArtefact;

    /// The artefact's own id
    fn id(&self) -> Option<&str> {
        self.identifiable().id.as_deref()
    }

    fn urn(&self) -> Option<&str> {
        self.identifiable().urn.as_deref()
    }

    /// True if `id` equals this artefact's id; an artefact without an id never matches
    fn identifies_me_str(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

/// An identifiable artefact with localised names and descriptions
pub trait Nameable: Identifiable {
    fn nameable(&self) -> &NameableArtefact;

    fn names(&self) -> &[LocalisedText] {
        &self.nameable().names
    }

    fn descriptions(&self) -> &[LocalisedText] {
        &self.nameable().descriptions
    }

    /// Name for `locale`, falling back to untagged text and then English
    fn find_name(&self, locale: &str) -> Option<&LocalisedText> {
        text::find_localised(self.names(), locale)
    }

    /// Description for `locale`, with the same fallback as [`Nameable::find_name`]
    fn find_description(&self, locale: &str) -> Option<&LocalisedText> {
        text::find_localised(self.descriptions(), locale)
    }

    /// Human readable label; never fails
    fn display_text(&self, options: &DisplayOptions) -> String {
        text::display_text(self.names(), self.descriptions(), self.id(), options)
    }
}

/// A nameable artefact with a version
pub trait Versionable: Nameable {
    fn version(&self) -> Option<&str>;

    fn valid_from(&self) -> Option<&DateTime<Utc>> {
        None
    }

    fn valid_to(&self) -> Option<&DateTime<Utc>> {
        None
    }
}

/// A top-level artefact owned by an agency
pub trait Maintainable: Versionable {
    fn maintainable(&self) -> &MaintainableArtefact;

    fn agency_id(&self) -> Option<&str> {
        self.maintainable().agency_id.as_deref()
    }

    /// Compound-key match.
    ///
    /// Agency and id must be present on this artefact and equal. The version
    /// matches when either side omits it or both are equal.
    fn identifies_me(&self, agency_id: &str, id: &str, version: Option<&str>) -> bool {
        match (self.agency_id(), self.id()) {
            (Some(own_agency), Some(own_id)) => {
                own_agency == agency_id && own_id == id && versions_match(self.version(), version)
            }
            _ => false,
        }
    }

    /// Match against a reference; references without agency or id never match
    fn identifies_me_reference(&self, reference: &Reference) -> bool {
        match (&reference.agency_id, &reference.maintainable_id) {
            (Some(agency), Some(id)) => self.identifies_me(agency, id, reference.version.as_deref()),
            _ => false,
        }
    }

    /// Match against a URN or REST URL.
    ///
    /// An exact match on the artefact's own URN or URI wins; otherwise the
    /// URI is decoded to a key. Undecodable URIs never match.
    fn identifies_me_uri(&self, uri: &str) -> bool {
        let identity = self.identifiable();
        if identity.urn.as_deref() == Some(uri) || identity.uri.as_deref() == Some(uri) {
            return true;
        }
        match Reference::from_uri(uri) {
            Ok(reference) => self.identifies_me_reference(&reference),
            Err(e) => {
                trace!("URI does not decode to a structure key: {}", e);
                false
            }
        }
    }

    /// This artefact's own compound key
    fn as_reference(&self) -> Reference {
        Reference {
            agency_id: self.agency_id().map(str::to_string),
            maintainable_id: self.id().map(str::to_string),
            version: self.version().map(str::to_string),
            ..Reference::default()
        }
    }
}

/// Implement the four capability traits for a type with a
/// `maintainable: MaintainableArtefact` field.
///
/// Generic types are written as `impl_maintainable!(impl<T> Scheme<T>)`.
macro_rules! impl_maintainable {
    (@impl [$($generic:ident),*] $ty:ty) => {
        impl<$($generic),*> $crate::models::identity::Identifiable for $ty {
            fn identifiable(&self) -> &$crate::models::identity::IdentifiableArtefact {
                &self.maintainable.nameable.identity
            }
        }

        impl<$($generic),*> $crate::models::identity::Nameable for $ty {
            fn nameable(&self) -> &$crate::models::identity::NameableArtefact {
                &self.maintainable.nameable
            }
        }

        impl<$($generic),*> $crate::models::identity::Versionable for $ty {
            fn version(&self) -> Option<&str> {
                self.maintainable.version.as_deref()
            }

            fn valid_from(&self) -> Option<&::chrono::DateTime<::chrono::Utc>> {
                self.maintainable.valid_from.as_ref()
            }

            fn valid_to(&self) -> Option<&::chrono::DateTime<::chrono::Utc>> {
                self.maintainable.valid_to.as_ref()
            }
        }

        impl<$($generic),*> $crate::models::identity::Maintainable for $ty {
            fn maintainable(&self) -> &$crate::models::identity::MaintainableArtefact {
                &self.maintainable
            }
        }
    };
    (impl<$($generic:ident),+> $ty:ty) => {
        impl_maintainable!(@impl [$($generic),+] $ty);
    };
    ($ty:ty) => {
        impl_maintainable!(@impl [] $ty);
    };
}

pub(crate) use impl_maintainable;

#[cfg(test)]
mod tests {
    use super::*;

    struct Artefact {
        maintainable: MaintainableArtefact,
    }

    impl_maintainable!(Artefact);

    fn artefact(version: Option<&str>) -> Artefact {
        Artefact {
            maintainable: MaintainableArtefact::new("ABC", "CL_A", version),
        }
    }

    #[test]
    fn test_identifies_me_reflexive() {
        let a = artefact(Some("1.0"));
        assert!(a.identifies_me("ABC", "CL_A", Some("1.0")));
        assert!(a.identifies_me("ABC", "CL_A", None));
        assert!(!a.identifies_me("ABC", "CL_A", Some("2.0")));
        assert!(!a.identifies_me("XYZ", "CL_A", Some("1.0")));
    }

    #[test]
    fn test_unversioned_artefact_matches_any_version() {
        let a = artefact(None);
        assert!(a.identifies_me("ABC", "CL_A", Some("3.1")));
    }

    #[test]
    fn test_missing_agency_never_matches() {
        let mut a = artefact(Some("1.0"));
        a.maintainable.agency_id = None;
        assert!(!a.identifies_me("ABC", "CL_A", Some("1.0")));
        assert!(!a.identifies_me_uri("urn:sdmx:org.sdmx.infomodel.codelist.Codelist=ABC:CL_A(1.0)"));
    }

    #[test]
    fn test_identifies_me_uri() {
        let mut a = artefact(Some("1.0"));
        assert!(a.identifies_me_uri("urn:sdmx:org.sdmx.infomodel.codelist.Codelist=ABC:CL_A(1.0)"));
        assert!(!a.identifies_me_uri("urn:sdmx:org.sdmx.infomodel.codelist.Codelist=ABC:CL_A(2.0)"));
        assert!(!a.identifies_me_uri("garbage"));

        a.maintainable.nameable.identity.uri = Some("https://example.org/my-list".to_string());
        assert!(a.identifies_me_uri("https://example.org/my-list"));
    }

    #[test]
    fn test_as_reference() {
        let r = artefact(Some("1.0")).as_reference();
        assert_eq!(r, Reference::new("ABC", "CL_A", Some("1.0")));
    }
}
