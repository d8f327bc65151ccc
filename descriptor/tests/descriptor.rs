use std::sync::Arc;

use cell_society_core::{
    CellShape, ConfigError, DescriptorField, EdgePolicy, MessageCatalog, MessageKey,
    RuleProfile, SimulationKind, ValidationError,
};
use cell_society_descriptor::{
    DescriptorFields, RawDescriptor, SharedMessages, SimulationDescriptor,
};
use cell_society_messages::MessageBundle;
use cell_society_rules::RuleTable;
use cell_society_system_state_synthesizer::seeded_source;

fn english() -> SharedMessages {
    Arc::new(MessageBundle::english())
}

fn game_of_life() -> DescriptorFields {
    DescriptorFields {
        simulation_name: "Game of Life".to_owned(),
        columns: 2,
        rows: 2,
        configs: Some("0,1,1,0".to_owned()),
        neighbors: "1,1,1,1,0,1,1,1,1".to_owned(),
        colors: "white,black".to_owned(),
        ..DescriptorFields::default()
    }
}

fn descriptor(fields: DescriptorFields) -> SimulationDescriptor {
    SimulationDescriptor::new(fields, &RuleTable::builtin(), english())
        .expect("descriptor constructs")
}

fn validation_error(result: Result<impl std::fmt::Debug, ConfigError>) -> ValidationError {
    match result {
        Err(ConfigError::Invalid { error, .. }) => error,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn recognized_names_resolve_in_any_case() {
    for kind in SimulationKind::ALL {
        for name in [kind.display_name().to_owned(), kind.display_name().to_uppercase()] {
            let fields = DescriptorFields {
                simulation_name: name.clone(),
                ..game_of_life()
            };
            let descriptor = descriptor(fields);
            assert_eq!(descriptor.simulation_name().expect("name is valid"), name);
            assert_eq!(descriptor.simulation_kind().expect("kind resolves"), kind);
        }
    }
}

#[test]
fn unrecognized_name_fails_lazily_with_localized_message() {
    let descriptor = descriptor(DescriptorFields {
        simulation_name: "Game of Strife".to_owned(),
        ..game_of_life()
    });

    assert_eq!(descriptor.rows().expect("rows stay readable"), 2);
    let error = descriptor.simulation_name().expect_err("name is invalid");
    assert_eq!(
        error.to_string(),
        MessageBundle::english().message(MessageKey::InvalidSimName)
    );
    assert!(matches!(
        validation_error(descriptor.colors()),
        ValidationError::InvalidSimName { .. }
    ));
}

#[test]
fn recognized_name_without_rule_fails_construction() {
    let mut rules = RuleTable::builtin();
    let _ = rules.unregister(SimulationKind::GameOfLife);

    let result = SimulationDescriptor::new(game_of_life(), &rules, english());
    assert_eq!(
        result.map(|_| ()),
        Err(ConfigError::UnknownRuleType {
            name: "Game of Life".to_owned(),
        })
    );
}

#[test]
fn encoded_states_decode_row_major() {
    let descriptor = descriptor(game_of_life());
    let grid = descriptor
        .initial_states(&mut seeded_source(0))
        .expect("states decode");

    assert_eq!(grid.to_nested(), vec![vec![0, 1], vec![1, 0]]);
}

#[test]
fn short_encoding_is_invalid_coordinates() {
    let descriptor = descriptor(DescriptorFields {
        configs: Some("0,1,1".to_owned()),
        ..game_of_life()
    });

    assert_eq!(
        validation_error(descriptor.configs()),
        ValidationError::InvalidCoordinates {
            expected: 4,
            found: 3,
        }
    );
}

#[test]
fn state_equal_to_state_count_is_rejected() {
    let descriptor = descriptor(DescriptorFields {
        configs: Some("0,1,2,0".to_owned()),
        ..game_of_life()
    });

    assert!(matches!(
        validation_error(descriptor.configs()),
        ValidationError::InvalidStates { num_states: 2, .. }
    ));
}

#[test]
fn empty_encoding_synthesizes_valid_states() {
    let descriptor = descriptor(DescriptorFields {
        simulation_name: "Fire".to_owned(),
        columns: 3,
        rows: 3,
        configs: Some(String::new()),
        colors: "yellow,green,red".to_owned(),
        ..game_of_life()
    });

    let mut rng = seeded_source(17);
    for _ in 0..3 {
        let grid = descriptor.initial_states(&mut rng).expect("synthesis succeeds");
        assert_eq!((grid.columns(), grid.rows()), (3, 3));
        assert!(grid.cells().iter().all(|state| (0..3).contains(state)));
    }
    assert!(descriptor.configs().is_ok());
}

#[test]
fn triangle_shape_requires_even_dimensions() {
    let odd = descriptor(DescriptorFields {
        shape: Some("triangle".to_owned()),
        rows: 3,
        columns: 4,
        configs: None,
        ..game_of_life()
    });
    assert_eq!(
        validation_error(odd.shape()),
        ValidationError::OddValuesWhenTriangle {
            rows: 3,
            columns: 4,
        }
    );

    let even = descriptor(DescriptorFields {
        shape: Some("triangle".to_owned()),
        rows: 4,
        columns: 4,
        configs: None,
        ..game_of_life()
    });
    assert_eq!(even.shape(), Ok(CellShape::Triangle));
}

#[test]
fn shape_reports_invalid_rows_first() {
    let descriptor = descriptor(DescriptorFields {
        shape: Some("triangle".to_owned()),
        rows: 0,
        ..game_of_life()
    });

    assert_eq!(
        validation_error(descriptor.shape()),
        ValidationError::InvalidRows { value: 0 }
    );
}

#[test]
fn square_shape_ignores_invalid_dimensions() {
    for shape in [Some("hexagon"), Some("square"), None] {
        let descriptor = descriptor(DescriptorFields {
            shape: shape.map(str::to_owned),
            rows: 0,
            columns: -1,
            ..game_of_life()
        });
        assert_eq!(descriptor.shape(), Ok(CellShape::Square));
        assert!(descriptor.rows().is_err());
    }
}

#[test]
fn oversized_grid_fails_without_allocating() {
    let descriptor = descriptor(DescriptorFields {
        rows: i64::from(u32::MAX),
        columns: i64::from(u32::MAX),
        configs: None,
        ..game_of_life()
    });

    assert!(matches!(
        validation_error(descriptor.initial_states(&mut seeded_source(3))),
        ValidationError::GridTooLarge { .. }
    ));
}

#[test]
fn negative_dimensions_are_rejected() {
    let descriptor = descriptor(DescriptorFields {
        rows: -2,
        columns: -2,
        ..game_of_life()
    });

    assert_eq!(
        validation_error(descriptor.rows()),
        ValidationError::InvalidRows { value: -2 }
    );
    assert_eq!(
        validation_error(descriptor.columns()),
        ValidationError::InvalidCols { value: -2 }
    );
}

#[test]
fn color_count_must_match_state_count() {
    let fire = |colors: &str| {
        descriptor(DescriptorFields {
            simulation_name: "Fire".to_owned(),
            colors: colors.to_owned(),
            configs: None,
            ..game_of_life()
        })
    };

    assert!(matches!(
        validation_error(fire("red,green").colors()),
        ValidationError::TooFewColors {
            expected: 3,
            found: 2,
        }
    ));
    assert!(matches!(
        validation_error(fire("red,green,blue,yellow").colors()),
        ValidationError::TooManyColors {
            expected: 3,
            found: 4,
        }
    ));
    assert_eq!(
        fire("red,green,blue").colors(),
        Ok(vec!["red".to_owned(), "green".to_owned(), "blue".to_owned()])
    );
    assert_eq!(
        fire("red,green,blue,").colors(),
        Ok(vec!["red".to_owned(), "green".to_owned(), "blue".to_owned()])
    );
}

#[test]
fn grid_lines_only_enabled_by_one() {
    for (flag, expected) in [(Some(1), true), (Some(0), false), (Some(7), false), (None, false)] {
        let descriptor = descriptor(DescriptorFields {
            grid_lines: flag,
            ..game_of_life()
        });
        assert_eq!(descriptor.grid_lines(), expected);
        assert_eq!(descriptor.grid_lines(), expected, "repeated reads agree");
    }
}

#[test]
fn defaults_fill_optional_fields() {
    let descriptor = descriptor(DescriptorFields {
        edge_type: Some("spherical".to_owned()),
        shape: Some("hexagon".to_owned()),
        ..game_of_life()
    });
    let english = MessageBundle::english();

    assert_eq!(descriptor.edge_policy(), EdgePolicy::Finite);
    assert_eq!(descriptor.shape(), Ok(CellShape::Square));
    assert_eq!(descriptor.title(), english.message(MessageKey::NoTitle));
    assert_eq!(descriptor.author(), english.message(MessageKey::NoAuthor));
    assert_eq!(
        descriptor.description(),
        english.message(MessageKey::NoDescription)
    );
}

#[test]
fn failures_are_repeatable() {
    let descriptor = descriptor(DescriptorFields {
        colors: "white".to_owned(),
        ..game_of_life()
    });

    assert_eq!(descriptor.colors(), descriptor.colors());
    assert!(descriptor.colors().is_err());
}

#[test]
fn eager_validation_collects_every_field() {
    let descriptor = descriptor(DescriptorFields {
        title: Some("Blinker".to_owned()),
        edge_type: Some("TOROIDAL".to_owned()),
        grid_lines: Some(1),
        ..game_of_life()
    });

    let validated = descriptor
        .validate(&mut seeded_source(5))
        .expect("descriptor is valid");
    assert_eq!(validated.kind, SimulationKind::GameOfLife);
    assert_eq!(validated.title, "Blinker");
    assert_eq!(validated.edge_policy, EdgePolicy::Toroidal);
    assert!(validated.grid_lines);
    assert_eq!(validated.initial_states.cells(), &[0, 1, 1, 0]);
    assert_eq!(
        validated.neighbor_offsets.to_nested(),
        vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]
    );
    assert_eq!(validated.color_for(1), Some("black"));
    assert_eq!(validated.color_for(2), None);
}

#[test]
fn eager_validation_stops_at_first_failure() {
    let descriptor = descriptor(DescriptorFields {
        rows: 0,
        colors: "white".to_owned(),
        ..game_of_life()
    });

    assert_eq!(
        validation_error(descriptor.validate(&mut seeded_source(5))),
        ValidationError::InvalidRows { value: 0 }
    );
}

#[test]
fn custom_rule_profiles_drive_state_checks() {
    let mut rules = RuleTable::builtin();
    let _ = rules.register(
        SimulationKind::GameOfLife,
        RuleProfile::with_states(3).expect("non-zero"),
    );
    let descriptor = SimulationDescriptor::new(
        DescriptorFields {
            configs: Some("0,1,2,0".to_owned()),
            colors: "white,black,grey".to_owned(),
            ..game_of_life()
        },
        &rules,
        english(),
    )
    .expect("descriptor constructs");

    assert!(descriptor.validate(&mut seeded_source(1)).is_ok());
}

#[test]
fn raw_map_requires_mandatory_fields() {
    let raw = RawDescriptor::from_pairs([("simulationName", "Fire"), ("cols", "3")]);
    let result = SimulationDescriptor::from_raw(raw, &RuleTable::builtin(), english());

    assert_eq!(
        result.map(|_| ()),
        Err(ConfigError::MissingField(DescriptorField::Rows))
    );
}

#[test]
fn toml_descriptor_deserializes_into_raw_map() {
    let raw: RawDescriptor = toml::from_str(
        r#"
            simulationName = "Rock Paper Scissors"
            gridLines = 1
            cols = 2
            rows = 2
            configs = "0,1,2,0"
            neighbors = "1,1,1,1,0,1,1,1,1"
            colors = "red,white,blue"
            wrap = true
        "#,
    )
    .expect("descriptor parses");

    assert_eq!(raw.get(DescriptorField::Cols), Some("2"));
    assert_eq!(raw.get(DescriptorField::GridLines), Some("1"));
    let descriptor = SimulationDescriptor::from_raw(raw, &RuleTable::builtin(), english())
        .expect("descriptor constructs");
    assert!(descriptor.grid_lines());
    assert!(descriptor.validate(&mut seeded_source(2)).is_ok());
}

#[test]
fn display_dumps_raw_fields_in_key_order() {
    let raw = RawDescriptor::from_pairs([
        ("simulationName", "Fire"),
        ("rows", "3"),
        ("cols", "3"),
        ("neighbors", "0,1,0,1,0,1,0,1,0"),
        ("colors", "a,b,c"),
    ]);
    let descriptor = SimulationDescriptor::from_raw(raw, &RuleTable::builtin(), english())
        .expect("descriptor constructs");

    assert_eq!(
        descriptor.to_string(),
        concat!(
            "Simulation {\n",
            "  colors='a,b,c',\n",
            "  cols='3',\n",
            "  neighbors='0,1,0,1,0,1,0,1,0',\n",
            "  rows='3',\n",
            "  simulationName='Fire',\n",
            "}\n",
        )
    );
}

#[test]
fn placeholders_follow_the_selected_locale() {
    let spanish = MessageBundle::from_toml_str(
        &MessageKey::ALL
            .into_iter()
            .fold("locale = \"Spanish\"\n[messages]\n".to_owned(), |mut text, key| {
                text.push_str(&format!("{key} = \"es:{key}\"\n"));
                text
            }),
    )
    .expect("bundle parses");
    let descriptor =
        SimulationDescriptor::new(game_of_life(), &RuleTable::builtin(), Arc::new(spanish))
            .expect("descriptor constructs");

    assert_eq!(descriptor.locale(), "Spanish");
    assert_eq!(descriptor.title(), "es:NoTitle");
}
