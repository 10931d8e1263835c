use flagser_core::config::{MaxDimension, RunConfig};
use flagser_core::params::{Approximation, DimensionBound};
use proptest::prelude::*;

fn divisible(value: i64) -> bool {
    (2..value).any(|divisor| value % divisor == 0)
}

proptest! {
    #[test]
    fn coefficient_is_accepted_only_when_prime(coeff in -50i64..3000) {
        let config = RunConfig { coeff, ..RunConfig::default() };
        let outcome = config.into_params();
        if coeff >= 2 && !divisible(coeff) {
            let params = outcome.unwrap();
            prop_assert_eq!(i64::from(params.coeff), coeff);
        } else {
            let err = outcome.unwrap_err();
            prop_assert_eq!(err.code(), "non-prime-coefficient");
        }
    }

    #[test]
    fn dimension_window_must_be_ordered(min in 0i64..40, max in 0i64..40) {
        let config = RunConfig {
            min_dimension: min,
            max_dimension: MaxDimension::Finite(max),
            ..RunConfig::default()
        };
        match config.into_params() {
            Ok(params) => {
                prop_assert!(min <= max);
                prop_assert_eq!(params.max_dimension, DimensionBound::AtMost(max as usize));
                prop_assert_eq!(params.enumeration_limit(), Some(max as usize + 1));
            }
            Err(err) => {
                prop_assert!(min > max);
                prop_assert_eq!(err.code(), "dimension-bounds");
            }
        }
    }

    #[test]
    fn raw_approximation_maps_to_a_limit(raw in any::<i32>()) {
        let config = RunConfig { approximation: i64::from(raw), ..RunConfig::default() };
        let params = config.into_params().unwrap();
        if raw <= 0 {
            prop_assert_eq!(params.approximation, Approximation::Exact);
        } else {
            prop_assert_eq!(params.approximation, Approximation::Bounded(raw as usize));
        }
    }
}
