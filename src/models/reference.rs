//! References to maintainable artefacts and their items
//!
//! A reference is the compound key `{agency, id, version}` of a maintainable
//! artefact, optionally narrowed to one item of that artefact. It can also be
//! decoded from an SDMX URN or an SDMX REST URL.
//!
//! # Version wildcard
//!
//! An absent version is a wildcard, not a distinct "unversioned" state: a
//! reference without a version identifies every version of the named
//! artefact, and an artefact without a version is identified by a reference
//! carrying any version. Two references can therefore both identify the same
//! artefact while disagreeing about whether the version matters.

use crate::error::{RegistryError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static URN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^urn:sdmx:org\.sdmx\.infomodel\.([a-z]+)\.([A-Za-z]+)=([^:]+):([^(]+)\(([^)]*)\)(?:\.(.+))?$",
    )
    .unwrap()
});

/// REST version tokens meaning "any version"
const WILDCARD_VERSIONS: &[&str] = &["latest", "*", "+", "~", "all"];

/// The kinds of artefact this registry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureClass {
    Codelist,
    Code,
    ConceptScheme,
    Concept,
    DataStructure,
    Dataflow,
}

impl StructureClass {
    /// Information-model package used in URNs
    pub fn package(&self) -> &'static str {
        match self {
            StructureClass::Codelist | StructureClass::Code => "codelist",
            StructureClass::ConceptScheme | StructureClass::Concept => "conceptscheme",
            StructureClass::DataStructure | StructureClass::Dataflow => "datastructure",
        }
    }

    /// Class name used in URNs
    pub fn class_name(&self) -> &'static str {
        match self {
            StructureClass::Codelist => "Codelist",
            StructureClass::Code => "Code",
            StructureClass::ConceptScheme => "ConceptScheme",
            StructureClass::Concept => "Concept",
            StructureClass::DataStructure => "DataStructure",
            StructureClass::Dataflow => "Dataflow",
        }
    }

    /// Whether references of this class point at an item inside a scheme
    pub fn is_item(&self) -> bool {
        matches!(self, StructureClass::Code | StructureClass::Concept)
    }

    fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "Codelist" | "CodeList" => Some(StructureClass::Codelist),
            "Code" => Some(StructureClass::Code),
            "ConceptScheme" => Some(StructureClass::ConceptScheme),
            "Concept" => Some(StructureClass::Concept),
            "DataStructure" => Some(StructureClass::DataStructure),
            "Dataflow" | "DataFlow" => Some(StructureClass::Dataflow),
            _ => None,
        }
    }

    fn from_rest_resource(resource: &str) -> Option<Self> {
        match resource {
            "codelist" => Some(StructureClass::Codelist),
            "conceptscheme" => Some(StructureClass::ConceptScheme),
            "datastructure" => Some(StructureClass::DataStructure),
            "dataflow" => Some(StructureClass::Dataflow),
            _ => None,
        }
    }
}

/// Returns true if two versions match under the wildcard rule
pub fn versions_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// A reference to a maintainable artefact or one of its items
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainable_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<StructureClass>,
    /// Source URN or URL when the reference was given in that form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
}

impl Reference {
    /// Reference to a maintainable artefact by compound key
    pub fn new(agency_id: &str, maintainable_id: &str, version: Option<&str>) -> Self {
        Self {
            agency_id: Some(agency_id.to_string()),
            maintainable_id: Some(maintainable_id.to_string()),
            version: version.map(str::to_string),
            ..Self::default()
        }
    }

    /// Reference to an item inside a maintainable artefact
    pub fn item(agency_id: &str, maintainable_id: &str, version: Option<&str>, item_id: &str) -> Self {
        Self {
            item_id: Some(item_id.to_string()),
            ..Self::new(agency_id, maintainable_id, version)
        }
    }

    /// Reference carrying only a maintainable id (legacy formats)
    pub fn bare(maintainable_id: &str) -> Self {
        Self {
            maintainable_id: Some(maintainable_id.to_string()),
            ..Self::default()
        }
    }

    /// Reference carrying only a URN or URL, decoded lazily on lookup
    pub fn from_urn_string(urn: &str) -> Self {
        Self {
            urn: Some(urn.to_string()),
            ..Self::default()
        }
    }

    /// Set the structure class
    pub fn with_class(mut self, class: StructureClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Parse an SDMX URN
    ///
    /// ```
    /// use sdmx_registry::models::reference::Reference;
    ///
    /// let r = Reference::from_urn("urn:sdmx:org.sdmx.infomodel.codelist.Code=ECB:CL_FREQ(1.0).A").unwrap();
    /// assert_eq!(r.agency_id.as_deref(), Some("ECB"));
    /// assert_eq!(r.maintainable_id.as_deref(), Some("CL_FREQ"));
    /// assert_eq!(r.version.as_deref(), Some("1.0"));
    /// assert_eq!(r.item_id.as_deref(), Some("A"));
    /// ```
    pub fn from_urn(urn: &str) -> Result<Self> {
        let captures = URN_REGEX
            .captures(urn.trim())
            .ok_or_else(|| RegistryError::MalformedUri(urn.to_string()))?;

        let class = StructureClass::from_class_name(&captures[2]);
        Ok(Self {
            agency_id: Some(captures[3].to_string()),
            maintainable_id: Some(captures[4].to_string()),
            version: normalize_version(&captures[5]),
            item_id: captures.get(6).map(|m| m.as_str().to_string()),
            class,
            urn: Some(urn.to_string()),
        })
    }

    /// Decode a URN or an SDMX REST URL
    ///
    /// REST URLs are read as `.../<resource>/<agency>/<id>/<version>[/<item>]`
    /// where `<resource>` is one of `codelist`, `conceptscheme`,
    /// `datastructure` or `dataflow`.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let trimmed = uri.trim();
        if trimmed.starts_with("urn:") {
            return Self::from_urn(trimmed);
        }

        let path = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let resource_at = segments
            .iter()
            .position(|s| StructureClass::from_rest_resource(s).is_some())
            .ok_or_else(|| RegistryError::MalformedUri(uri.to_string()))?;

        let rest = &segments[resource_at + 1..];
        if rest.len() < 2 {
            return Err(RegistryError::MalformedUri(uri.to_string()));
        }

        Ok(Self {
            agency_id: Some(rest[0].to_string()),
            maintainable_id: Some(rest[1].to_string()),
            version: rest.get(2).and_then(|v| normalize_version(v)),
            item_id: rest.get(3).map(|s| s.to_string()),
            class: StructureClass::from_rest_resource(segments[resource_at]),
            urn: Some(uri.to_string()),
        })
    }

    /// Render this reference as a URN for the given class
    ///
    /// Returns None when agency or maintainable id is missing, or when an
    /// item class is requested without an item id. An absent version is
    /// written as `*` and decodes back to the wildcard.
    pub fn to_urn(&self, class: StructureClass) -> Option<String> {
        let agency = self.agency_id.as_deref()?;
        let id = self.maintainable_id.as_deref()?;
        let version = self.version.as_deref().unwrap_or("*");
        let mut urn = format!(
            "urn:sdmx:org.sdmx.infomodel.{}.{}={}:{}({})",
            class.package(),
            class.class_name(),
            agency,
            id,
            version
        );
        if class.is_item() {
            urn.push('.');
            urn.push_str(self.item_id.as_deref()?);
        }
        Some(urn)
    }

    /// The same reference without its item part
    pub fn maintainable_part(&self) -> Reference {
        Reference {
            item_id: None,
            ..self.clone()
        }
    }

    /// True when the reference does not pin a version
    pub fn is_version_wildcard(&self) -> bool {
        self.version.is_none()
    }

    /// Agency, id and version, decoding the URN when the key fields are absent
    pub fn resolve_key(&self) -> Option<Reference> {
        if self.maintainable_id.is_some() {
            return Some(self.clone());
        }
        let urn = self.urn.as_deref()?;
        let decoded = Self::from_uri(urn).ok()?;
        Some(Reference {
            item_id: self.item_id.clone().or(decoded.item_id.clone()),
            ..decoded
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.maintainable_id.is_none() {
            if let Some(urn) = &self.urn {
                return write!(f, "{}", urn);
            }
        }
        write!(
            f,
            "{}:{}({})",
            self.agency_id.as_deref().unwrap_or("*"),
            self.maintainable_id.as_deref().unwrap_or("*"),
            self.version.as_deref().unwrap_or("*")
        )?;
        if let Some(item) = &self.item_id {
            write!(f, ".{}", item)?;
        }
        Ok(())
    }
}

fn normalize_version(version: &str) -> Option<String> {
    let version = version.trim();
    if version.is_empty() || WILDCARD_VERSIONS.contains(&version) {
        None
    } else {
        Some(version.to_string())
    }
}
