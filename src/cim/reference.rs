use serde::{Deserialize, Serialize};
use yaserde_derive::{YaDeserialize, YaSerialize};

/// An element pointing at another RDF subject through `rdf:resource`,
/// e.g. `<md:Model.DependentOn rdf:resource="urn:uuid:..."/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, YaSerialize, YaDeserialize, Serialize, Deserialize)]
#[yaserde(
    rename = "Reference",
    namespace = "rdf: http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    namespace = "md: http://iec.ch/TC57/61970-552/ModelDescription/1#"
)]
#[serde(default)]
pub struct Reference {
    /// Character data of the element, usually empty.
    #[yaserde(text)]
    pub text: String,
    /// Value of the `rdf:resource` attribute.
    #[yaserde(attribute, prefix = "rdf", rename = "resource")]
    pub resource: String,
}

impl Reference {
    pub fn new(resource: impl Into<String>) -> Self {
        Reference { text: String::new(), resource: resource.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.resource.is_empty()
    }

    /// The identifier the resource points at: the fragment after the last `#` (or the whole
    /// resource when there is none) without its leading `#`/`_` markers.
    pub fn local_id(&self) -> &str {
        let fragment = self
            .resource
            .rsplit_once('#')
            .map_or(self.resource.as_str(), |(_, fragment)| fragment);
        remove_rdf_characters(fragment)
    }
}

/// Strips every leading `#` and `_`, the markers RDF/XML puts in front of local identifiers.
///
/// Only the prefix is touched: `"##_foo"` becomes `"foo"`, `"foo_bar"` is returned unchanged and
/// a string made only of markers yields `""`.
pub fn remove_rdf_characters(s: &str) -> &str {
    s.trim_start_matches(|c: char| c == '#' || c == '_')
}
