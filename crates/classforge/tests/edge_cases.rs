//! Edge cases in markup scanning and tree output

use classforge::{generate, ForgeError};

#[test]
fn test_unclosed_class_is_skipped() {
    let input = r#"<Class name="Root" isRoot="true"></Class>
<Class name="Broken" isRoot="false">
<Class name="Leaf" isRoot="false"></Class>
<Aggregation source="Leaf" target="Root" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert!(artefacts.metadata.get("Broken").is_none());
    assert_eq!(artefacts.config, "<Root>\n\t<Leaf>\n\t</Leaf>\n</Root>");
}

#[test]
fn test_single_line_document() {
    let input = r#"<Class name="A" isRoot="true"><Attribute name="x" type="int"/></Class><Class name="B" isRoot="false"></Class><Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert_eq!(
        artefacts.config,
        "<A>\n\t<x>int</x>\n\t<B>\n\t</B>\n</A>"
    );
}

#[test]
fn test_surrounding_markup_is_ignored() {
    let input = r#"<?xml version="1.0"?>
<ClassDiagram>
    <!-- model -->
    <Class name="A" isRoot="true" documentation="top"></Class>
    <Class name="B" isRoot="false"></Class>
    <Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>
</ClassDiagram>"#;

    let artefacts = generate(input).unwrap();
    assert_eq!(artefacts.metadata.len(), 2);
    assert_eq!(artefacts.config, "<A>\n\t<B>\n\t</B>\n</A>");
}

#[test]
fn test_single_quoted_values() {
    let input = "<Class name='A' isRoot='true'></Class>\n<Class name='B' isRoot='false'></Class>\n<Aggregation source='B' target='A' sourceMultiplicity='2' targetMultiplicity='1'/>";

    let artefacts = generate(input).unwrap();
    assert_eq!(artefacts.metadata.get("B").unwrap().max, "2");
}

#[test]
fn test_self_closing_class() {
    let input = r#"<Class name="A" isRoot="true"></Class>
<Class name="B" isRoot="false"/>
<Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert!(artefacts.metadata.get("B").unwrap().parameters.is_empty());
}

#[test]
fn test_incomplete_aggregation_is_skipped() {
    let input = r#"<Class name="A" isRoot="true"></Class>
<Class name="B" isRoot="false"></Class>
<Aggregation source="B" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let err = generate(input).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ForgeError>(),
        Some(ForgeError::MissingRelationship { .. })
    ));
}

#[test]
fn test_attribute_missing_type_is_skipped() {
    let input = r#"<Class name="A" isRoot="true">
    <Attribute name="id"/>
    <Attribute name="label" type="string"/>
</Class>
<Class name="B" isRoot="false"></Class>
<Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    let params = &artefacts.metadata.get("A").unwrap().parameters;
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "label");
}

#[test]
fn test_non_ascii_names_pass_through() {
    let input = r#"<Class name="École" isRoot="true"></Class>
<Class name="Élève" isRoot="false"></Class>
<Aggregation source="Élève" target="École" sourceMultiplicity="1..*" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert_eq!(artefacts.config, "<École>\n\t<Élève>\n\t</Élève>\n</École>");
    assert!(artefacts.metadata_json().unwrap().contains("\"Élève\""));
}

#[test]
fn test_valueless_class_token_keeps_root() {
    let input = r#"<Class name="A" isRoot="true" abstract></Class>
<Class name="B" isRoot="false"></Class>
<Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert_eq!(artefacts.metadata.root().unwrap().name, "A");
    assert_eq!(artefacts.config, "<A>\n\t<B>\n\t</B>\n</A>");
}

#[test]
fn test_valueless_attribute_token_keeps_attribute() {
    let input = r#"<Class name="A" isRoot="true">
    <Attribute name="x" type="int" required/>
</Class>
<Class name="B" isRoot="false"></Class>
<Aggregation source="B" target="A" sourceMultiplicity="1" targetMultiplicity="1"/>"#;

    let artefacts = generate(input).unwrap();
    assert_eq!(artefacts.config, "<A>\n\t<x>int</x>\n\t<B>\n\t</B>\n</A>");
}

#[test]
fn test_deep_aggregation_chain() {
    let depth = 3000;
    let mut input = String::from("<Class name=\"C0\" isRoot=\"true\"></Class>\n");
    for i in 1..depth {
        input.push_str(&format!(
            "<Class name=\"C{i}\" isRoot=\"false\"></Class>\n<Aggregation source=\"C{i}\" target=\"C{}\" sourceMultiplicity=\"1\" targetMultiplicity=\"1\"/>\n",
            i - 1
        ));
    }

    let artefacts = generate(&input).unwrap();
    let deepest = format!("{}<C{}>", "\t".repeat(depth - 1), depth - 1);
    assert!(artefacts.config.lines().any(|line| line == deepest));
    assert_eq!(artefacts.config.lines().count(), 2 * depth);
}
