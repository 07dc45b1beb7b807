use std::path::Path;

use annotation_schema_catalog::{CatalogError, TypeModel};
use annotation_schema_core::{AnnotationValue, AttributeSource, Target, names};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ENTITY_YAML: &str = r#"
types:
  - name: Acme.Entity
    annotations:
      - kind: System.ComponentModel.DataAnnotations.DisplayAttribute
        values: { Name: Entity }
    members:
      - name: id
        annotations:
          - kind: System.ComponentModel.DataAnnotations.RequiredAttribute
"#;

const PERSON_JSON: &str = r#"{
  "types": [
    {
      "name": "Acme.Person",
      "base": "Acme.Entity",
      "members": [
        {
          "name": "age",
          "annotations": [
            {
              "kind": "System.ComponentModel.DataAnnotations.RangeAttribute",
              "values": { "Minimum": 0, "Maximum": 120 }
            }
          ]
        },
        {
          "name": "color",
          "annotations": [
            {
              "kind": "System.ComponentModel.DataAnnotations.EnumDataTypeAttribute",
              "values": { "EnumType": { "type_ref": "Acme.Color" } }
            }
          ]
        }
      ]
    }
  ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[test]
fn test_single_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "entity.yml", ENTITY_YAML);

    let model = TypeModel::from_path(dir.path().join("entity.yml")).unwrap();
    assert_eq!(model.len(), 1);
    assert!(model.contains_type("Acme.Entity"));
    assert_eq!(model.member_names("Acme.Entity"), ["id"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TypeModel::from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CatalogError::IoError(_)));
}

#[test]
fn test_malformed_files_report_format_errors() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.json", "{ not json");
    write(dir.path(), "bad.yaml", "types: [ {");

    let err = TypeModel::from_path(dir.path().join("bad.json")).unwrap_err();
    assert!(matches!(err, CatalogError::JsonError(_)));

    let err = TypeModel::from_path(dir.path().join("bad.yaml")).unwrap_err();
    assert!(matches!(err, CatalogError::YamlError(_)));
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

#[test]
fn test_directory_merges_mixed_formats() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_person.json", PERSON_JSON);
    write(dir.path(), "b_entity.yaml", ENTITY_YAML);
    write(dir.path(), "notes.txt", "ignored");
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let model = TypeModel::from_dir(dir.path()).unwrap();
    assert_eq!(model.len(), 2);
    // name order: the JSON file comes first
    assert_eq!(
        model.type_names().collect::<Vec<_>>(),
        ["Acme.Person", "Acme.Entity"]
    );
    assert_eq!(model.base_type("Acme.Person"), Some("Acme.Entity"));
}

#[test]
fn test_directory_with_duplicate_types_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "one.yaml", ENTITY_YAML);
    write(dir.path(), "two.yaml", ENTITY_YAML);

    let err = TypeModel::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateType(name) if name == "Acme.Entity"));
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let model = TypeModel::from_dir(dir.path()).unwrap();
    assert!(model.is_empty());
    assert!(model.kinds().contains(names::REQUIRED_ATTRIBUTE));
}

// ---------------------------------------------------------------------------
// Attribute source behavior
// ---------------------------------------------------------------------------

#[test]
fn test_inherited_lookup_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "entity.yaml", ENTITY_YAML);
    write(dir.path(), "person.json", PERSON_JSON);
    let model = TypeModel::from_dir(dir.path()).unwrap();

    let id = Target::Member {
        owner: "Acme.Person",
        member: "id",
    };
    let inherited = model.attributes(id, true);
    assert_eq!(inherited.len(), 1);
    assert_eq!(inherited[0].kind().name(), names::REQUIRED_ATTRIBUTE);
    assert!(model.attributes(id, false).is_empty());

    let display = model.attributes(Target::Type("Acme.Person"), true);
    assert_eq!(display[0].get("Name"), AnnotationValue::from("Entity"));
}

#[test]
fn test_values_keep_their_shape() {
    let model = TypeModel::from_json_str(PERSON_JSON.replace(r#""base": "Acme.Entity","#, "").as_str())
        .unwrap();

    let age = model.attributes(
        Target::Member {
            owner: "Acme.Person",
            member: "age",
        },
        true,
    );
    assert_eq!(age[0].get("Minimum"), AnnotationValue::Int(0));
    assert_eq!(age[0].get("Maximum"), AnnotationValue::Int(120));
    assert!(age[0].get("ErrorMessage").is_null());

    let color = model.attributes(
        Target::Member {
            owner: "Acme.Person",
            member: "color",
        },
        true,
    );
    assert_eq!(
        color[0].get("EnumType"),
        AnnotationValue::type_ref("Acme.Color")
    );
}

#[test]
fn test_custom_kind_derives_from_standard() {
    let model = TypeModel::from_yaml_str(
        r#"
kinds:
  - name: Acme.PercentAttribute
    base: System.ComponentModel.DataAnnotations.RangeAttribute
    members: [Precision]
types:
  - name: Acme.Invoice
    members:
      - name: discount
        annotations:
          - kind: Acme.PercentAttribute
            values: { Minimum: 0, Maximum: 100, Precision: 2 }
"#,
    )
    .unwrap();

    let found = model.attributes(
        Target::Member {
            owner: "Acme.Invoice",
            member: "discount",
        },
        true,
    );
    let kind = found[0].kind();
    assert!(kind.derives_from(names::RANGE_ATTRIBUTE));
    assert!(kind.declares("Maximum"));
    assert_eq!(found[0].get("Precision"), AnnotationValue::Int(2));
}
