use flagser_core::config::RunConfig;
use flagser_core::result::{DimensionSummary, HomologyResult, PersistenceDiagram, PersistencePair};

fn sample_result() -> HomologyResult {
    HomologyResult {
        dimensions: vec![
            DimensionSummary {
                dimension: 0,
                cell_count: 3,
                betti: 1,
                diagram: PersistenceDiagram {
                    pairs: vec![
                        PersistencePair::finite(0.0, 1.0),
                        PersistencePair::finite(0.0, 2.0),
                        PersistencePair::essential(0.0),
                    ],
                },
            },
            DimensionSummary {
                dimension: 1,
                cell_count: 3,
                betti: 0,
                diagram: PersistenceDiagram::default(),
            },
        ],
        euler_characteristic: 0,
        approximate: false,
    }
}

#[test]
fn homology_result_round_trips_json() {
    let result = sample_result();
    let json = serde_json::to_string_pretty(&result).expect("serialize");
    let decoded: HomologyResult = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, result);
    assert!(decoded.dimensions[0].diagram.pairs[2].is_essential());
}

#[test]
fn essential_death_is_null_in_json() {
    let value = serde_json::to_value(PersistencePair::essential(0.5)).expect("serialize");
    assert_eq!(value, serde_json::json!({ "birth": 0.5, "death": null }));
}

#[test]
fn accessors_follow_reported_dimensions() {
    let result = sample_result();
    assert_eq!(result.cell_counts(), vec![3, 3]);
    assert_eq!(result.betti_numbers(), vec![1, 0]);
    assert_eq!(result.euler(), vec![0, 0]);
    assert_eq!(result.dgms()[0][2], [0.0, f64::INFINITY]);
}

#[test]
fn run_config_round_trips_yaml() {
    let config = RunConfig {
        coeff: 3,
        filtration: "pmean".into(),
        exponent: 1.5,
        ..RunConfig::default()
    };
    let yaml = serde_yaml::to_string(&config).expect("serialize");
    let decoded = RunConfig::from_yaml(&yaml).expect("deserialize");
    assert_eq!(decoded, config);
}
