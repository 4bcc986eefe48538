use serde::{Deserialize, Serialize};
use yaserde_derive::{YaDeserialize, YaSerialize};

use super::full_model::FullModel;
use super::RDF_NS;
use crate::codec::RdfRoot;
use crate::error::CimError;

/// The `rdf:RDF` envelope of a CGMES document.
///
/// Only the `md:FullModel` header is kept; every other top-level object in the document is
/// skipped while reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, YaSerialize, YaDeserialize, Serialize, Deserialize)]
#[yaserde(
    rename = "RDF",
    prefix = "rdf",
    namespace = "rdf: http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    namespace = "md: http://iec.ch/TC57/61970-552/ModelDescription/1#"
)]
#[serde(default)]
pub struct CgmesDocument {
    /// `None` when the document carries no `md:FullModel`.
    #[yaserde(child, prefix = "md", rename = "FullModel")]
    pub full_model: Option<FullModel>,
}

impl CgmesDocument {
    pub fn new(full_model: FullModel) -> Self {
        CgmesDocument { full_model: Some(full_model) }
    }

    /// The model header, or `CimError::MissingHeader` when the envelope has none
    pub fn into_header(self) -> Result<FullModel, CimError> {
        self.full_model.ok_or(CimError::MissingHeader)
    }
}

impl RdfRoot for CgmesDocument {
    const NAMESPACE: &'static str = RDF_NS;
    const LOCAL_NAME: &'static str = "RDF";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_header_reports_it() {
        assert!(matches!(CgmesDocument::default().into_header(), Err(CimError::MissingHeader)));
    }

    #[test]
    fn envelope_hands_out_its_header() {
        let header = FullModel { about: "urn:uuid:3".to_string(), ..FullModel::default() };
        let document = CgmesDocument::new(header.clone());
        assert_eq!(document.into_header().unwrap(), header);
    }
}
