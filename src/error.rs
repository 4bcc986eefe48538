/// Errors raised while reading or writing CIM records as RDF/XML
#[derive(Debug, thiserror::Error)]
pub enum CimError {
    /// Failure reported by the yaserde serializer or deserializer, passed through unchanged
    #[error("XML binding failed: {0}")]
    Xml(String),
    #[error("failed to read XML: {0}")]
    Read(#[from] xml::reader::Error),
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },
    #[error("document has no root element")]
    MissingRoot,
    #[error("document has no md:FullModel header")]
    MissingHeader,
}
