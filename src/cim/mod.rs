pub mod document;
pub mod full_model;
pub mod profile;
pub mod reference;

pub use document::CgmesDocument;
pub use full_model::FullModel;
pub use profile::CgmesProfile;
pub use reference::{remove_rdf_characters, Reference};

/// Namespace of the RDF syntax vocabulary (`rdf:RDF`, `rdf:about`, `rdf:resource`)
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Namespace of the IEC 61970-552 model description header (`md:FullModel`, `md:Model.*`)
pub const MD_NS: &str = "http://iec.ch/TC57/61970-552/ModelDescription/1#";
