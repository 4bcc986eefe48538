//! RDF/XML entry points around the yaserde derives on the `cim` records.
//!
//! yaserde does the binding. This module checks the root element before handing a document to
//! it and escapes line breaks in the serialized data so they survive end-of-line normalization.

use xml::name::OwnedName;
use xml::reader::{EventReader, XmlEvent};
use yaserde::{YaDeserialize, YaSerialize};

use crate::cim::{MD_NS, RDF_NS};
use crate::error::CimError;

/// A record that can stand as the root element of a document.
pub trait RdfRoot: YaSerialize + YaDeserialize {
    const NAMESPACE: &'static str;
    const LOCAL_NAME: &'static str;

    fn matches_root(name: &OwnedName) -> bool {
        name.namespace.as_deref() == Some(Self::NAMESPACE) && name.local_name == Self::LOCAL_NAME
    }
}

/// Output settings for [`to_string_with_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    pub perform_indent: bool,
    pub write_document_declaration: bool,
    /// Indentation unit; the emitter default (two spaces) when `None`.
    pub indent_string: Option<String>,
}

impl Default for WriteConfig {
    fn default() -> Self {
        WriteConfig {
            perform_indent: true,
            write_document_declaration: true,
            indent_string: None,
        }
    }
}

impl WriteConfig {
    fn to_yaserde(&self) -> yaserde::ser::Config {
        yaserde::ser::Config {
            perform_indent: self.perform_indent,
            write_document_declaration: self.write_document_declaration,
            indent_string: self.indent_string.clone(),
        }
    }
}

pub fn to_string<T: RdfRoot>(value: &T) -> Result<String, CimError> {
    to_string_with_config(value, &WriteConfig::default())
}

pub fn to_string_with_config<T: RdfRoot>(value: &T, config: &WriteConfig) -> Result<String, CimError> {
    let xml = yaserde::ser::to_string_with_config(value, &config.to_yaserde()).map_err(CimError::Xml)?;
    Ok(escape_line_breaks(&xml))
}

pub fn from_str<T: RdfRoot>(xml: &str) -> Result<T, CimError> {
    let root = root_element(xml)?;
    if !T::matches_root(&root) {
        return Err(CimError::UnexpectedRoot {
            expected: qualified_name(T::NAMESPACE, T::LOCAL_NAME),
            found: display_name(&root),
        });
    }
    yaserde::de::from_str(xml).map_err(CimError::Xml)
}

/// Name of the first element of `xml`. Only the prolog and the root start tag are parsed.
pub fn root_element(xml: &str) -> Result<OwnedName, CimError> {
    for event in EventReader::new(xml.as_bytes()) {
        if let XmlEvent::StartElement { name, .. } = event? {
            return Ok(name);
        }
    }
    Err(CimError::MissingRoot)
}

/// Replace the line breaks the emitter leaves literal inside data with character references.
///
/// A reader folds a literal `\r` into `\n`, and turns `\n` or `\t` inside an attribute value into
/// a space. Whitespace the emitter writes between tags is never inside a quoted value and never
/// contains `\r`, so it is left as is.
pub(crate) fn escape_line_breaks(xml: &str) -> String {
    let mut escaped = String::with_capacity(xml.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    for c in xml.chars() {
        match (c, in_tag, quote) {
            ('\r', _, _) => escaped.push_str("&#xD;"),
            ('\n', true, Some(_)) => escaped.push_str("&#xA;"),
            ('\t', true, Some(_)) => escaped.push_str("&#x9;"),
            ('<', false, _) => {
                in_tag = true;
                escaped.push(c);
            }
            ('>', true, None) => {
                in_tag = false;
                escaped.push(c);
            }
            ('"' | '\'', true, None) => {
                quote = Some(c);
                escaped.push(c);
            }
            (_, true, Some(open)) if c == open => {
                quote = None;
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn qualified_name(namespace: &str, local_name: &str) -> String {
    let prefix = match namespace {
        RDF_NS => "rdf",
        MD_NS => "md",
        _ => return local_name.to_string(),
    };
    format!("{}:{}", prefix, local_name)
}

fn display_name(name: &OwnedName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local_name),
        None => name.local_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cim::{CgmesDocument, FullModel, Reference};

    const EQ: &str = "http://entsoe.eu/CIM/EquipmentCore/3/1";
    const OP: &str = "http://entsoe.eu/CIM/EquipmentOperation/3/1";
    const SC: &str = "http://entsoe.eu/CIM/EquipmentShortCircuit/3/1";

    fn sample_header() -> FullModel {
        FullModel {
            about: "urn:uuid:0a9a7e1f-5c4d-4f53-8b1a-3f3c1e2a9b10".to_string(),
            modeling_authority_set: "http://elia.be/CGMES/2.4.15".to_string(),
            dependent_on: Reference::new("urn:uuid:2399cbd1-9a39-11e0-aa80-0800200c9a66"),
            profile: vec![EQ.to_string(), OP.to_string(), SC.to_string()],
            description: "CGMES Conformity Assessment: MicroGrid BaseCase".to_string(),
            version: 4,
            scenario_time: "2015-11-27T18:30:00Z".to_string(),
            created: "2016-01-18T10:52:56Z".to_string(),
        }
    }

    fn wrap(body: &str) -> String {
        format!(
            r#"<md:FullModel xmlns:md="{MD_NS}" xmlns:rdf="{RDF_NS}" rdf:about="urn:uuid:1">{body}</md:FullModel>"#
        )
    }

    #[test]
    fn round_trip_keeps_profiles_in_order() {
        let header = sample_header();
        let xml = to_string(&header).unwrap();
        let back: FullModel = from_str(&xml).unwrap();
        assert_eq!(back.profile, vec![EQ, OP, SC]);
        assert_eq!(back, header);
    }

    #[test]
    fn writes_namespace_qualified_tags() {
        let xml = to_string(&sample_header()).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(&format!("xmlns:md=\"{MD_NS}\"")));
        assert!(xml.contains(&format!("xmlns:rdf=\"{RDF_NS}\"")));
        assert!(xml.contains("<md:FullModel"));
        assert!(xml.contains("rdf:about=\"urn:uuid:0a9a7e1f-5c4d-4f53-8b1a-3f3c1e2a9b10\""));
        assert!(xml.contains("rdf:resource=\"urn:uuid:2399cbd1-9a39-11e0-aa80-0800200c9a66\""));
        assert!(xml.contains("<md:Model.version>4</md:Model.version>"));
        assert!(xml.contains(&format!("<md:Model.profile>{OP}</md:Model.profile>")));
        assert!(xml.contains("<md:Model.modelingAuthoritySet>http://elia.be/CGMES/2.4.15</md:Model.modelingAuthoritySet>"));
        assert!(xml.contains("<md:Model.scenarioTime>2015-11-27T18:30:00Z</md:Model.scenarioTime>"));
        assert!(xml.contains("<md:Model.created>2016-01-18T10:52:56Z</md:Model.created>"));
    }

    #[test]
    fn default_header_round_trips() {
        let xml = to_string(&FullModel::default()).unwrap();
        let back: FullModel = from_str(&xml).unwrap();
        assert_eq!(back, FullModel::default());
    }

    #[test]
    fn missing_dependency_reads_as_empty_reference() {
        let xml = wrap("<md:Model.version>2</md:Model.version>");
        let header: FullModel = from_str(&xml).unwrap();
        assert_eq!(header.dependent_on.text, "");
        assert_eq!(header.dependent_on.resource, "");
        assert_eq!(header.version, 2);
        assert_eq!(header.about, "urn:uuid:1");
    }

    #[test]
    fn reference_keeps_character_data() {
        let xml = wrap(r##"<md:Model.DependentOn rdf:resource="#_eq-model">boundary</md:Model.DependentOn>"##);
        let header: FullModel = from_str(&xml).unwrap();
        assert_eq!(header.dependent_on.resource, "#_eq-model");
        assert_eq!(header.dependent_on.text, "boundary");
        assert_eq!(header.dependent_on.local_id(), "eq-model");
    }

    #[test]
    fn renamed_prefixes_are_accepted() {
        let xml = format!(
            r#"<h:FullModel xmlns:h="{MD_NS}" xmlns:r="{RDF_NS}" r:about="urn:uuid:9">
                 <h:Model.description>renamed prefixes</h:Model.description>
               </h:FullModel>"#
        );
        let header: FullModel = from_str(&xml).unwrap();
        assert_eq!(header.about, "urn:uuid:9");
        assert_eq!(header.description, "renamed prefixes");
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let xml = wrap(
            r#"<md:Model.profile>a</md:Model.profile>
               <md:Model.unknown>ignored</md:Model.unknown>
               <md:Model.profile>b</md:Model.profile>"#,
        );
        let header: FullModel = from_str(&xml).unwrap();
        assert_eq!(header.profile, vec!["a", "b"]);
    }

    #[test]
    fn special_characters_are_escaped_and_restored() {
        let header = FullModel {
            description: "A & B <merged> \"quoted\"".to_string(),
            about: "urn:uuid:<&>".to_string(),
            ..FullModel::default()
        };
        let xml = to_string(&header).unwrap();
        assert!(!xml.contains("<merged>"));
        let back: FullModel = from_str(&xml).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn carriage_returns_survive_a_round_trip() {
        let header = FullModel {
            description: "a\r\nb".to_string(),
            dependent_on: Reference { text: "x\ry".to_string(), resource: "urn:uuid:7".to_string() },
            ..FullModel::default()
        };
        let xml = to_string(&header).unwrap();
        assert!(!xml.contains('\r'));
        assert!(xml.contains("a&#xD;\nb"));
        let back: FullModel = from_str(&xml).unwrap();
        assert_eq!(back.description, "a\r\nb");
        assert_eq!(back.dependent_on.text, "x\ry");
    }

    #[test]
    fn line_breaks_in_attribute_values_become_references() {
        let escaped = escape_line_breaks("<a b=\"x\ny\tz\r\" c='1\n'>\n  t\r\n</a>\n");
        assert_eq!(escaped, "<a b=\"x&#xA;y&#x9;z&#xD;\" c='1&#xA;'>\n  t&#xD;\n</a>\n");
    }

    #[test]
    fn invalid_version_is_reported() {
        let xml = wrap("<md:Model.version>v4</md:Model.version>");
        assert!(matches!(from_str::<FullModel>(&xml), Err(CimError::Xml(_))));
    }

    #[test]
    fn empty_version_reads_as_zero() {
        let header: FullModel = from_str(&wrap("<md:Model.version/>")).unwrap();
        assert_eq!(header.version, 0);
    }

    #[test]
    fn wrong_root_is_rejected() {
        let xml = format!(r#"<md:Header xmlns:md="{MD_NS}"/>"#);
        match from_str::<FullModel>(&xml) {
            Err(CimError::UnexpectedRoot { expected, found }) => {
                assert_eq!(expected, "md:FullModel");
                assert_eq!(found, "md:Header");
            }
            other => panic!("unexpected result {other:?}"),
        }
        let envelope = format!(r#"<rdf:RDF xmlns:rdf="{RDF_NS}"/>"#);
        assert!(matches!(from_str::<FullModel>(&envelope), Err(CimError::UnexpectedRoot { .. })));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(from_str::<FullModel>(&wrap("<md:Model.description>open")).is_err());
        assert!(matches!(from_str::<FullModel>(""), Err(CimError::Read(_)) | Err(CimError::MissingRoot)));
    }

    #[test]
    fn compact_output_has_no_declaration_or_indent() {
        let config = WriteConfig {
            perform_indent: false,
            write_document_declaration: false,
            indent_string: None,
        };
        let xml = to_string_with_config(&sample_header(), &config).unwrap();
        assert!(xml.starts_with("<md:FullModel"));
        assert!(!xml.contains('\n'));
        let back: FullModel = from_str(&xml).unwrap();
        assert_eq!(back, sample_header());
    }

    #[test]
    fn custom_indent_is_used() {
        let config = WriteConfig { indent_string: Some("\t".to_string()), ..WriteConfig::default() };
        let xml = to_string_with_config(&sample_header(), &config).unwrap();
        assert!(xml.contains("\n\t<md:Model.profile>"));
    }

    #[test]
    fn document_envelope_skips_other_objects() {
        let xml = format!(
            r##"<rdf:RDF xmlns:rdf="{RDF_NS}" xmlns:md="{MD_NS}" xmlns:cim="http://iec.ch/TC57/2013/CIM-schema-cim16#">
                 <cim:Terminal rdf:ID="_t1"><cim:IdentifiedObject.name>T1</cim:IdentifiedObject.name></cim:Terminal>
                 <md:FullModel rdf:about="urn:uuid:42">
                   <md:Model.profile>{EQ}</md:Model.profile>
                 </md:FullModel>
                 <cim:ACLineSegment rdf:ID="_l1"/>
               </rdf:RDF>"##
        );
        let document: CgmesDocument = from_str(&xml).unwrap();
        let header = document.into_header().unwrap();
        assert_eq!(header.about, "urn:uuid:42");
        assert_eq!(header.profile, vec![EQ]);
    }

    #[test]
    fn document_envelope_without_header_has_none() {
        let xml = format!(
            r##"<rdf:RDF xmlns:rdf="{RDF_NS}" xmlns:cim="http://iec.ch/TC57/2013/CIM-schema-cim16#">
                 <cim:Terminal rdf:ID="_t1"/>
               </rdf:RDF>"##
        );
        let document: CgmesDocument = from_str(&xml).unwrap();
        assert_eq!(document.full_model, None);
        assert!(matches!(document.into_header(), Err(CimError::MissingHeader)));
    }

    #[test]
    fn document_envelope_round_trips() {
        let document = CgmesDocument::new(sample_header());
        let xml = to_string(&document).unwrap();
        assert!(xml.contains("<rdf:RDF"));
        assert!(xml.contains("<md:FullModel"));
        let back: CgmesDocument = from_str(&xml).unwrap();
        assert_eq!(back, document);
    }
}
