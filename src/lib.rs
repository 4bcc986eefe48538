pub mod cim;
pub mod codec;
pub mod error;

pub use cim::{remove_rdf_characters, CgmesDocument, CgmesProfile, FullModel, Reference};
pub use codec::{RdfRoot, WriteConfig};
pub use error::CimError;

use anyhow::{Context, Result};
use codec::{from_str as from_xml_str, root_element, to_string_with_config as to_xml_str};
use regex::Regex;
use serde_json::{from_str as from_json_str, to_string_pretty as to_json_str};
use std::{
    fs::File as StdFile,
    io::{Read, Seek},
    path::Path,
    sync::LazyLock,
};
use zip::ZipArchive;

static SELF_CLOSING_PADDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+/>").expect("valid regex"));
static SPACE_BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").expect("valid regex"));
static XML_DECLARATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\?xml[^>]*\?>").expect("valid regex"));

/// Normalize XML by removing or collapsing excess whitespace and trimming newlines
pub fn normalize_whitespace(xml: &str) -> String {
    let xml = SELF_CLOSING_PADDING.replace_all(xml, "/>");
    let xml = SPACE_BETWEEN_TAGS.replace_all(&xml, "><");
    xml.trim().to_string()
}

/// Remove the XML declaration
pub fn remove_xml_declaration(xml: &str) -> String {
    XML_DECLARATION.replace_all(xml, "").to_string()
}

/// The header of one model file, e.g. an entry of a CGMES zip bundle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderFile {
    pub name: String,
    pub header: FullModel,
}

impl FullModel {
    pub fn remove_bom(s: &str) -> &str {
        s.strip_prefix('\u{FEFF}').unwrap_or(s)
    }

    /// a helper function to sanitize the XML String
    /// drops a leading byte order mark and normalizes `\r\n` to `\n`
    pub fn sanitize_xml_str(xml_str: &str) -> String {
        Self::remove_bom(xml_str).replace("\r\n", "\n")
    }

    /// Deserialize a FullModel from an XML string whose root is `md:FullModel`
    pub fn from_xml(xml_str: &str) -> Result<FullModel> {
        let my_xml_str = Self::sanitize_xml_str(xml_str);
        let loaded: FullModel = from_xml_str(&my_xml_str).context("Failed to parse XML string")?;
        Ok(loaded)
    }

    /// Serialize a FullModel into an indented XML string with declaration
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with_config(&WriteConfig::default())
    }

    pub fn to_xml_with_config(&self, config: &WriteConfig) -> Result<String> {
        let x_serialized = to_xml_str(self, config).context("Failed to serialize FullModel")?;
        Ok(x_serialized)
    }

    /// Deserialize a FullModel from a JSON string
    pub fn from_json(json_data: &str) -> Result<FullModel> {
        let header: FullModel = from_json_str(json_data)?;
        Ok(header)
    }

    /// Serialize a FullModel into a JSON string
    pub fn to_json(&self) -> Result<String> {
        let json = to_json_str(self)?;
        Ok(json)
    }

    /// Compare two XML strings after sanitization, declaration removal and whitespace normalization
    pub fn compare_xml(raw_xml: &str, generated_xml: &str) -> Result<(), String> {
        let normalize = |xml: &str| normalize_whitespace(&remove_xml_declaration(&Self::sanitize_xml_str(xml)));
        let raw_xml_normalized = normalize(raw_xml);
        let generated_xml_normalized = normalize(generated_xml);
        if raw_xml_normalized == generated_xml_normalized {
            Ok(())
        } else {
            Err(format!(
                "The XML strings do not match!\n\nOriginal:\n{}\n\nGenerated:\n{}",
                raw_xml_normalized, generated_xml_normalized
            ))
        }
    }
}

impl CgmesDocument {
    /// Deserialize the `rdf:RDF` envelope, keeping only its `md:FullModel` header
    pub fn from_xml(xml_str: &str) -> Result<CgmesDocument> {
        let my_xml_str = FullModel::sanitize_xml_str(xml_str);
        let loaded: CgmesDocument = from_xml_str(&my_xml_str).context("Failed to parse CGMES document")?;
        Ok(loaded)
    }

    pub fn to_xml(&self) -> Result<String> {
        let x_serialized = to_xml_str(self, &WriteConfig::default()).context("Failed to serialize CGMES document")?;
        Ok(x_serialized)
    }
}

/// Read the model header from either a bare `md:FullModel` element or a complete `rdf:RDF` document
pub fn read_header(xml_str: &str) -> Result<FullModel> {
    let my_xml_str = FullModel::sanitize_xml_str(xml_str);
    let root = root_element(&my_xml_str).context("Failed to parse XML string")?;
    if FullModel::matches_root(&root) {
        return FullModel::from_xml(&my_xml_str);
    }
    if CgmesDocument::matches_root(&root) {
        let document = CgmesDocument::from_xml(&my_xml_str)?;
        return Ok(document.into_header()?);
    }
    Err(CimError::UnexpectedRoot {
        expected: "md:FullModel or rdf:RDF".to_string(),
        found: root.local_name,
    })
    .context("Failed to parse XML string")
}

/// Read the header of a single `.xml` model file
pub fn load_xml(path: &str) -> Result<FullModel> {
    let xml_str = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    read_header(&xml_str).with_context(|| format!("No model header in {}", path))
}

/// Read the header of every `.xml` entry of a zip bundle, in archive order
pub fn from_zip_reader<R: Read + Seek>(reader: R) -> Result<Vec<HeaderFile>> {
    let mut zip = ZipArchive::new(reader).context("Failed to open zip archive")?;
    let mut headers = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = entry.name().to_string();
        if entry.is_dir() || !name.to_ascii_lowercase().ends_with(".xml") {
            log::debug!("skipping zip entry {}", name);
            continue;
        }
        let mut xml_str = String::new();
        entry.read_to_string(&mut xml_str).with_context(|| format!("Failed to read {}", name))?;
        let header = read_header(&xml_str).with_context(|| format!("No model header in {}", name))?;
        log::debug!("read header {} from {}", header.about, name);
        headers.push(HeaderFile { name, header });
    }
    Ok(headers)
}

/// Read and deserialize the headers of a `.zip` bundle
pub fn load_zip(path: &str) -> Result<Vec<HeaderFile>> {
    let zipfile = StdFile::open(path).with_context(|| format!("Failed to open {}", path))?;
    from_zip_reader(zipfile).with_context(|| format!("Failed to load {}", path))
}

/// Load headers from a `.zip` bundle or a single XML file, chosen by extension
pub fn load(path: &str) -> Result<Vec<HeaderFile>> {
    let is_zip = Path::new(path)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("zip"));
    if is_zip {
        return load_zip(path);
    }
    let header = load_xml(path)?;
    Ok(vec![HeaderFile { name: path.to_string(), header }])
}
