use annotation_schema_catalog::TypeModel;
use annotation_schema_extract::{
    AccessorRegistry, ConstraintExtractor, DisplayText, ExtractError, ExtractorConfig, Format,
    LengthBounds, MemberConstraints, NumericRange, Slot,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PEOPLE_YAML: &str = r#"
kinds:
  - name: Acme.PercentAttribute
    base: System.ComponentModel.DataAnnotations.RangeAttribute
  - name: Legacy.StringLengthAttribute
    members: [MaximumLength]
  - name: Acme.BoundAttribute
    members: [Minimum]
types:
  - name: Acme.Person
    annotations:
      - kind: System.ComponentModel.DataAnnotations.DisplayAttribute
        values: { Name: Person, Description: A human being }
    members:
      - name: age
        annotations:
          - kind: System.ComponentModel.DataAnnotations.RangeAttribute
            values: { Minimum: 0, Maximum: 120 }
      - name: email
        annotations:
          - kind: System.ComponentModel.DataAnnotations.EmailAddressAttribute
          - kind: System.ComponentModel.DataAnnotations.RequiredAttribute
            values: { AllowEmptyStrings: false }
      - name: name
        annotations:
          - kind: System.ComponentModel.DataAnnotations.StringLengthAttribute
            values: { MaximumLength: 50, MinimumLength: 2 }
          - kind: System.ComponentModel.DataAnnotations.DisplayAttribute
            values: { Name: "", Description: Given and family name }
          - kind: System.ComponentModel.DisplayNameAttribute
            values: { DisplayName: Full name }
      - name: nickname
        annotations:
          - kind: System.ComponentModel.DataAnnotations.DisplayAttribute
            values: { Name: Alias }
          - kind: System.ComponentModel.DisplayNameAttribute
            values: { DisplayName: Ignored }
      - name: mobile
        annotations:
          - kind: System.ComponentModel.DataAnnotations.DataTypeAttribute
            values:
              DataType: { enum_type: System.ComponentModel.DataAnnotations.DataType, variant: Date }
          - kind: System.ComponentModel.DataAnnotations.PhoneAttribute
      - name: born
        annotations:
          - kind: System.ComponentModel.DataAnnotations.DataTypeAttribute
            values:
              DataType: { enum_type: System.ComponentModel.DataAnnotations.DataType, variant: Date }
      - name: favorite
        annotations:
          - kind: System.ComponentModel.DataAnnotations.EnumDataTypeAttribute
            values: { EnumType: { type_ref: Acme.Color } }
      - name: code
        annotations:
          - kind: Legacy.StringLengthAttribute
            values: { MaximumLength: 8 }
          - kind: Acme.BoundAttribute
            values: { Minimum: 1 }
  - name: Acme.Employee
    base: Acme.Person
    members:
      - name: age
        annotations:
          - kind: System.ComponentModel.DescriptionAttribute
            values: { Description: Age in whole years }
      - name: bonus
        annotations:
          - kind: Acme.PercentAttribute
            values: { Minimum: 0, Maximum: 100 }
      - name: salary
        annotations:
          - kind: System.ComponentModel.DataAnnotations.RangeAttribute
            values: { Minimum: "1,000.50", Maximum: high }
"#;

fn model() -> TypeModel {
    TypeModel::from_yaml_str(PEOPLE_YAML).unwrap()
}

// ---------------------------------------------------------------------------
// Core scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_person_age_email_and_required() {
    let model = model();
    let registry = AccessorRegistry::new();
    let extractor = ConstraintExtractor::new(&model).with_registry(&registry);

    assert_eq!(
        extractor.range("Acme.Person", Some("age")).unwrap(),
        Some(NumericRange {
            minimum: 0.0,
            maximum: 120.0
        })
    );
    assert!(!extractor.required("Acme.Person", Some("age")));

    assert_eq!(
        extractor.format("Acme.Person", Some("email")).unwrap(),
        Some(Format::Email)
    );
    assert_eq!(Format::Email.as_str(), "email");
    assert!(extractor.required("Acme.Person", Some("email")));
}

#[test]
fn test_subclass_of_range_is_transparent() {
    let model = model();
    let registry = AccessorRegistry::new();
    let extractor = ConstraintExtractor::new(&model).with_registry(&registry);

    assert_eq!(
        extractor.range("Acme.Employee", Some("bonus")).unwrap(),
        Some(NumericRange {
            minimum: 0.0,
            maximum: 100.0
        })
    );
    // readers are built against the recognized kind, not the subclass
    assert!(
        registry
            .lookup(Slot::Range, "System.ComponentModel.DataAnnotations.RangeAttribute")
            .is_some()
    );
    assert!(registry.lookup(Slot::Range, "Acme.PercentAttribute").is_none());
}

#[test]
fn test_phone_indicator_beats_date_data_type() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(
        extractor.format("Acme.Person", Some("mobile")).unwrap(),
        Some(Format::Phone)
    );
    assert_eq!(
        extractor.format("Acme.Person", Some("born")).unwrap(),
        Some(Format::Date)
    );
    assert_eq!(extractor.format("Acme.Person", Some("favorite")).unwrap(), None);
}

#[test]
fn test_enum_data_type_reads_type_reference() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);
    assert_eq!(
        extractor
            .enum_data_type("Acme.Person", Some("favorite"))
            .unwrap()
            .as_deref(),
        Some("Acme.Color")
    );
}

// ---------------------------------------------------------------------------
// Display resolution
// ---------------------------------------------------------------------------

#[test]
fn test_empty_display_name_falls_back_to_legacy() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(
        extractor.display_name("Acme.Person", Some("name")).unwrap().as_deref(),
        Some("Full name")
    );
    assert_eq!(
        extractor.description("Acme.Person", Some("name")).unwrap().as_deref(),
        Some("Given and family name")
    );
}

#[test]
fn test_non_empty_display_name_ignores_legacy() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(
        extractor
            .display_name("Acme.Person", Some("nickname"))
            .unwrap()
            .as_deref(),
        Some("Alias")
    );
}

#[test]
fn test_member_precedence_and_type_fallback() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    // no member-level display: the type's display annotation is used
    assert_eq!(
        extractor.display("Acme.Person", Some("age")).unwrap(),
        Some(DisplayText {
            name: Some("Person".into()),
            description: Some("A human being".into()),
        })
    );
    assert_eq!(
        extractor.display("Acme.Person", Some("nickname")).unwrap(),
        Some(DisplayText {
            name: Some("Alias".into()),
            description: None,
        })
    );
    assert_eq!(
        extractor.display_name("Acme.Person", None).unwrap().as_deref(),
        Some("Person")
    );
}

#[test]
fn test_display_on_base_type_wins_over_legacy_description() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    // Employee.age carries a legacy description, but the inherited display
    // annotation on Person already provides one
    assert_eq!(
        extractor
            .description("Acme.Employee", Some("age"))
            .unwrap()
            .as_deref(),
        Some("A human being")
    );
}

// ---------------------------------------------------------------------------
// Inheritance and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_inherited_member_annotations() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(
        extractor.range("Acme.Employee", Some("age")).unwrap(),
        Some(NumericRange {
            minimum: 0.0,
            maximum: 120.0
        })
    );
    assert!(extractor.required("Acme.Employee", Some("email")));
}

#[test]
fn test_config_without_inheritance() {
    let model = model();
    let config = ExtractorConfig {
        include_inherited: false,
        ..ExtractorConfig::default()
    };
    let registry = AccessorRegistry::new();
    let extractor = ConstraintExtractor::with_config(&model, &config, &registry);

    assert_eq!(extractor.range("Acme.Employee", Some("age")).unwrap(), None);
    assert!(!extractor.required("Acme.Employee", Some("email")));
    assert_eq!(
        extractor.description("Acme.Employee", Some("age")).unwrap().as_deref(),
        Some("Age in whole years")
    );
}

#[test]
fn test_config_file_with_legacy_string_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotation-schema.yml");
    std::fs::write(
        &path,
        "version: \"1.0\"\nkinds:\n  string_length: Legacy.StringLengthAttribute\n",
    )
    .unwrap();

    let config = ExtractorConfig::load(&path).unwrap();
    assert_eq!(
        config.kinds.range,
        "System.ComponentModel.DataAnnotations.RangeAttribute"
    );

    let model = model();
    let registry = AccessorRegistry::new();
    let extractor = ConstraintExtractor::with_config(&model, &config, &registry);

    assert_eq!(
        extractor.string_length("Acme.Person", Some("code")).unwrap(),
        Some(LengthBounds {
            minimum: 0,
            maximum: 8
        })
    );
    // the standard string-length annotation is no longer recognized
    assert_eq!(extractor.string_length("Acme.Person", Some("name")).unwrap(), None);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_kind_without_required_members_is_shape_mismatch() {
    let model = model();
    let mut config = ExtractorConfig::default();
    config.kinds.range = "Acme.BoundAttribute".to_string();
    let registry = AccessorRegistry::new();
    let extractor = ConstraintExtractor::with_config(&model, &config, &registry);

    let err = extractor.range("Acme.Person", Some("code")).unwrap_err();
    assert_eq!(
        err,
        ExtractError::ShapeMismatch {
            slot: Slot::Range,
            kind: "Acme.BoundAttribute".into(),
            member: "Maximum".into(),
        }
    );
    assert!(registry.is_empty());
}

#[test]
fn test_unconvertible_bound_is_conversion_error() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    let err = extractor.range("Acme.Employee", Some("salary")).unwrap_err();
    match err {
        ExtractError::ConversionError {
            member, expected, ..
        } => {
            assert_eq!(member, "Maximum");
            assert_eq!(expected, "a number");
        }
        other => panic!("expected a conversion error, got {other:?}"),
    }
    assert!(
        extractor
            .member_constraints("Acme.Employee", Some("salary"))
            .is_err()
    );
}

#[test]
fn test_missing_annotations_are_absent_not_errors() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(extractor.range("Acme.Nobody", Some("x")).unwrap(), None);
    assert_eq!(extractor.pattern("Acme.Person", Some("age")).unwrap(), None);
    assert_eq!(extractor.min_length("Acme.Person", None).unwrap(), None);
}

// ---------------------------------------------------------------------------
// Unset members and shared registries
// ---------------------------------------------------------------------------

#[test]
fn test_string_length_with_only_maximum_set() {
    let model = TypeModel::from_yaml_str(
        r#"
types:
  - name: Acme.Account
    members:
      - name: email
        annotations:
          - kind: System.ComponentModel.DataAnnotations.StringLengthAttribute
            values: { MaximumLength: 254 }
      - name: notes
        annotations:
          - kind: System.ComponentModel.DataAnnotations.MaxLengthAttribute
"#,
    )
    .unwrap();
    let extractor = ConstraintExtractor::new(&model);

    assert_eq!(
        extractor.string_length("Acme.Account", Some("email")).unwrap(),
        Some(LengthBounds {
            minimum: 0,
            maximum: 254
        })
    );
    assert_eq!(extractor.max_length("Acme.Account", Some("notes")).unwrap(), None);
    assert!(
        extractor
            .member_constraints("Acme.Account", Some("email"))
            .is_ok()
    );
}

#[test]
fn test_models_redeclaring_a_kind_do_not_share_readers() {
    let degraded = TypeModel::from_yaml_str(
        r#"
standard_kinds: false
kinds:
  - name: System.ComponentModel.DataAnnotations.StringLengthAttribute
    members: [MaximumLength]
types:
  - name: Acme.Legacy
    members:
      - name: code
        annotations:
          - kind: System.ComponentModel.DataAnnotations.StringLengthAttribute
            values: { MaximumLength: 8 }
"#,
    )
    .unwrap();
    let standard = TypeModel::from_yaml_str(
        r#"
types:
  - name: Acme.Modern
    members:
      - name: code
        annotations:
          - kind: System.ComponentModel.DataAnnotations.StringLengthAttribute
            values: { MaximumLength: 50, MinimumLength: 5 }
"#,
    )
    .unwrap();

    // both go through the process-wide registry
    let legacy = ConstraintExtractor::new(&degraded)
        .string_length("Acme.Legacy", Some("code"))
        .unwrap();
    let modern = ConstraintExtractor::new(&standard)
        .string_length("Acme.Modern", Some("code"))
        .unwrap();

    assert_eq!(
        legacy,
        Some(LengthBounds {
            minimum: 0,
            maximum: 8
        })
    );
    assert_eq!(
        modern,
        Some(LengthBounds {
            minimum: 5,
            maximum: 50
        })
    );
}

// ---------------------------------------------------------------------------
// Aggregate extraction
// ---------------------------------------------------------------------------

#[test]
fn test_member_constraints_serialize_without_absent_fields() {
    let model = model();
    let extractor = ConstraintExtractor::new(&model);

    let name = extractor.member_constraints("Acme.Person", Some("name")).unwrap();
    assert_eq!(
        name,
        MemberConstraints {
            required: false,
            string_length: Some(LengthBounds {
                minimum: 2,
                maximum: 50
            }),
            display_name: Some("Full name".into()),
            description: Some("Given and family name".into()),
            ..MemberConstraints::default()
        }
    );

    let json = serde_json::to_value(&name).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "required": false,
            "string_length": { "minimum": 2, "maximum": 50 },
            "display_name": "Full name",
            "description": "Given and family name"
        })
    );
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_first_use_builds_each_bundle_once() {
    let model = model();
    let members = ["age", "email", "name", "nickname", "mobile", "born", "favorite"];

    let sequential = AccessorRegistry::new();
    let expected: Vec<MemberConstraints> = members
        .iter()
        .map(|m| {
            ConstraintExtractor::new(&model)
                .with_registry(&sequential)
                .member_constraints("Acme.Person", Some(*m))
                .unwrap()
        })
        .collect();

    let shared = AccessorRegistry::new();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let extractor = ConstraintExtractor::new(&model).with_registry(&shared);
                for _ in 0..25 {
                    for (member, want) in members.iter().zip(&expected) {
                        let got = extractor
                            .member_constraints("Acme.Person", Some(*member))
                            .unwrap();
                        assert_eq!(&got, want);
                    }
                }
            });
        }
    });

    assert_eq!(shared.len(), sequential.len());
    assert_eq!(shared.constructions(), sequential.constructions());
    assert_eq!(shared.constructions(), shared.len());
}
