use serde::{Deserialize, Serialize};
use yaserde_derive::{YaDeserialize, YaSerialize};

use super::profile::CgmesProfile;
use super::reference::Reference;
use super::MD_NS;
use crate::codec::RdfRoot;

/// The `md:FullModel` header of a CIM model document
#[derive(Debug, Clone, Default, PartialEq, Eq, YaSerialize, YaDeserialize, Serialize, Deserialize)]
#[yaserde(
    rename = "FullModel",
    prefix = "md",
    namespace = "md: http://iec.ch/TC57/61970-552/ModelDescription/1#",
    namespace = "rdf: http://www.w3.org/1999/02/22-rdf-syntax-ns#"
)]
#[serde(default)]
pub struct FullModel {
    /// RDF subject of the model, usually `urn:uuid:...`.
    #[yaserde(attribute, prefix = "rdf", rename = "about")]
    pub about: String,

    #[yaserde(child, prefix = "md", rename = "Model.modelingAuthoritySet")]
    pub modeling_authority_set: String,

    /// Model this one depends on; `Reference::default()` when the document names none.
    #[yaserde(child, prefix = "md", rename = "Model.DependentOn")]
    pub dependent_on: Reference,

    /// Profile URIs in document order.
    #[yaserde(child, prefix = "md", rename = "Model.profile")]
    pub profile: Vec<String>,

    #[yaserde(child, prefix = "md", rename = "Model.description")]
    pub description: String,

    #[yaserde(child, prefix = "md", rename = "Model.version")]
    pub version: i64,

    #[yaserde(child, prefix = "md", rename = "Model.scenarioTime")]
    pub scenario_time: String,

    #[yaserde(child, prefix = "md", rename = "Model.created")]
    pub created: String,
}

impl FullModel {
    /// Known CGMES profiles among `profile`, in document order. Unrecognized URIs are left out.
    pub fn profile_kinds(&self) -> Vec<CgmesProfile> {
        self.profile.iter().filter_map(|uri| CgmesProfile::from_uri(uri)).collect()
    }

    pub fn has_profile(&self, kind: CgmesProfile) -> bool {
        self.profile.iter().any(|uri| CgmesProfile::from_uri(uri) == Some(kind))
    }

    pub fn dependency(&self) -> Option<&Reference> {
        (!self.dependent_on.is_empty()).then_some(&self.dependent_on)
    }
}

impl RdfRoot for FullModel {
    const NAMESPACE: &'static str = MD_NS;
    const LOCAL_NAME: &'static str = "FullModel";
}
