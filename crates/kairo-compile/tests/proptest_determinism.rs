//! Property-based tests for pipeline generation.

use std::sync::Arc;

use proptest::prelude::*;

use kairo_compile::{
    CompileError, LayoutMethod, PartialConfig, RoutingMethod, TranslationMethod,
    generate_pipeline,
};
use kairo_device::{CouplingMap, fake_target};

fn layout_method() -> impl Strategy<Value = Option<LayoutMethod>> {
    prop::option::of(prop_oneof![
        Just(LayoutMethod::Trivial),
        Just(LayoutMethod::Dense),
        Just(LayoutMethod::NoiseAdaptive),
        Just(LayoutMethod::Sabre),
    ])
}

fn routing_method() -> impl Strategy<Value = Option<RoutingMethod>> {
    prop::option::of(prop_oneof![
        Just(RoutingMethod::Basic),
        Just(RoutingMethod::Lookahead),
        Just(RoutingMethod::Stochastic),
        Just(RoutingMethod::Sabre),
        Just(RoutingMethod::None),
    ])
}

fn translation_method() -> impl Strategy<Value = Option<TranslationMethod>> {
    prop::option::of(prop_oneof![
        Just(TranslationMethod::Unroller),
        Just(TranslationMethod::Translator),
        Just(TranslationMethod::Synthesis),
    ])
}

fn overrides() -> impl Strategy<Value = PartialConfig> {
    (
        layout_method(),
        routing_method(),
        translation_method(),
        prop::option::of(any::<u64>()),
    )
        .prop_map(|(layout, routing, translation, seed)| PartialConfig {
            layout_method: layout,
            routing_method: routing,
            translation_method: translation,
            seed,
            ..PartialConfig::default()
        })
}

proptest! {
    #[test]
    fn identical_inputs_give_equal_pipelines(level in 0i64..=3, overrides in overrides()) {
        let target = Arc::new(fake_target("fake_montreal").unwrap());
        let first = generate_pipeline(level, None, Some(target.clone()), overrides.clone()).unwrap();
        let second = generate_pipeline(level, None, Some(target), overrides).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_levels_fail(level in prop_oneof![i64::MIN..0i64, 4i64..=i64::MAX]) {
        let err = generate_pipeline(level, None, None, PartialConfig::new()).unwrap_err();
        prop_assert!(matches!(err, CompileError::InvalidLevel(v) if v == level));
    }

    #[test]
    fn routing_only_uses_given_edges(
        n in 2u32..12,
        seed in any::<u64>(),
        level in 0i64..=3,
    ) {
        let coupling_map = CouplingMap::linear(n);
        let overrides = PartialConfig::new()
            .with_coupling_map(coupling_map.clone())
            .with_seed(seed);
        let pipeline = generate_pipeline(level, None, None, overrides).unwrap();
        let edges = serde_json::json!(coupling_map.edges());
        for pass in pipeline.passes() {
            if let Some(arg) = pass.arg("coupling_map") {
                prop_assert_eq!(arg, &edges);
            }
        }
    }
}
