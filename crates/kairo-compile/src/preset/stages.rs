//! Stage constructors shared by every level.

use serde_json::{Value, json};
use tracing::warn;

use kairo_device::{BasisGates, CouplingMap};

use super::{LayoutProbe, LevelPolicy};
use crate::config::{DerivedField, PassManagerConfig};
use crate::error::{CompileError, CompileResult};
use crate::method::{LayoutMethod, RoutingMethod, SchedulingMethod, TranslationMethod};
use crate::pipeline::{Condition, PassSpec, Stage, StageKind};

fn missing(stage: StageKind, field: DerivedField, reason: String) -> CompileError {
    CompileError::UnresolvedRequirement {
        stage,
        field: field.as_str(),
        reason,
    }
}

pub(crate) fn edges(coupling_map: &CouplingMap) -> Value {
    json!(coupling_map.edges())
}

pub(crate) fn basis(basis_gates: &BasisGates) -> Value {
    json!(basis_gates.to_vec())
}

fn seeded(pass: PassSpec, seed: Option<u64>) -> PassSpec {
    match seed {
        Some(seed) => pass.with_arg("seed", json!(seed)),
        None => pass,
    }
}

/// Warn when a plugin configuration will be ignored.
pub(crate) fn warn_ignored_plugin_config(config: &PassManagerConfig) {
    if config.unitary_synthesis_plugin_config.is_some()
        && config.unitary_synthesis_method.is_default()
    {
        warn!("unitary_synthesis_plugin_config is ignored by the default synthesis method");
    }
}

/// Unitary synthesis, optionally restricted to blocks of `min_qubits` or more.
pub(crate) fn unitary_synthesis(
    config: &PassManagerConfig,
    basis_gates: &BasisGates,
    min_qubits: Option<u32>,
) -> PassSpec {
    let mut pass = PassSpec::transformation("UnitarySynthesis")
        .with_arg("basis_gates", basis(basis_gates))
        .with_arg("method", json!(config.unitary_synthesis_method.as_str()));
    if let Some(degree) = config.approximation_degree {
        pass = pass.with_arg("approximation_degree", json!(degree.value()));
    }
    if let Some(min_qubits) = min_qubits {
        pass = pass.with_arg("min_qubits", json!(min_qubits));
    }
    if let Some(coupling_map) = &config.coupling_map {
        pass = pass.with_arg("coupling_map", edges(coupling_map));
    }
    match &config.unitary_synthesis_plugin_config {
        Some(plugin) if !config.unitary_synthesis_method.is_default() => {
            pass.with_arg("plugin_config", Value::Object(plugin.clone()))
        }
        _ => pass,
    }
}

/// Single-qubit run resynthesis into the basis, when one is known.
pub(crate) fn optimize_1q(config: &PassManagerConfig) -> PassSpec {
    let pass = PassSpec::transformation("Optimize1qGatesDecomposition");
    match &config.basis_gates {
        Some(basis_gates) => pass.with_arg("basis_gates", basis(basis_gates)),
        None => pass,
    }
}

pub(crate) fn init(extra: Vec<PassSpec>) -> Stage {
    let mut passes = vec![PassSpec::transformation("Unroll3qOrMore")];
    passes.extend(extra);
    Stage::new(StageKind::Init, passes)
}

fn layout_pass(
    method: LayoutMethod,
    config: &PassManagerConfig,
    coupling_map: &CouplingMap,
    policy: &LevelPolicy,
) -> CompileResult<PassSpec> {
    let pass = match method {
        LayoutMethod::Trivial => PassSpec::analysis("TrivialLayout"),
        LayoutMethod::Dense => PassSpec::analysis("DenseLayout")
            .with_arg("use_error_rates", json!(config.backend_properties.is_some())),
        LayoutMethod::NoiseAdaptive => {
            if config.backend_properties.is_none() {
                return Err(missing(
                    StageKind::Layout,
                    DerivedField::DeviceProperties,
                    "noise_adaptive layout ranks qubits by their error rates".into(),
                ));
            }
            PassSpec::analysis("NoiseAdaptiveLayout")
        }
        LayoutMethod::Sabre => seeded(
            PassSpec::analysis("SabreLayout")
                .with_arg("max_iterations", json!(policy.sabre_layout_iterations)),
            config.seed,
        ),
    };
    Ok(pass.with_arg("coupling_map", edges(coupling_map)))
}

pub(crate) fn layout(
    config: &PassManagerConfig,
    policy: &LevelPolicy,
) -> CompileResult<Option<Stage>> {
    let Some(coupling_map) = &config.coupling_map else {
        if let Some(method) = config.layout_method {
            return Err(missing(
                StageKind::Layout,
                DerivedField::Connectivity,
                format!("layout method '{method}' places qubits on a connectivity graph"),
            ));
        }
        if config.initial_layout.is_some() {
            return Err(missing(
                StageKind::Layout,
                DerivedField::Connectivity,
                "an initial layout names physical qubits of a connectivity graph".into(),
            ));
        }
        return Ok(None);
    };

    let mut passes = vec![];
    if let Some(initial) = &config.initial_layout {
        passes.push(PassSpec::analysis("SetLayout").with_arg("layout", json!(initial)));
    } else if let Some(method) = config.layout_method {
        passes.push(layout_pass(method, config, coupling_map, policy)?);
    } else {
        let fallback = layout_pass(policy.layout, config, coupling_map, policy)?;
        match policy.probe {
            LayoutProbe::None => passes.push(fallback),
            LayoutProbe::Trivial => {
                passes.push(
                    PassSpec::analysis("TrivialLayout").with_arg("coupling_map", edges(coupling_map)),
                );
                passes.push(
                    PassSpec::analysis("Layout2qDistance")
                        .with_arg("coupling_map", edges(coupling_map))
                        .with_arg("property_name", json!("trivial_layout_score")),
                );
                passes.push(fallback.when(Condition::TrivialLayoutImperfect));
            }
            LayoutProbe::PerfectSearch {
                call_limit,
                time_limit,
            } => {
                passes.push(seeded(
                    PassSpec::analysis("CSPLayout")
                        .with_arg("coupling_map", edges(coupling_map))
                        .with_arg("call_limit", json!(call_limit))
                        .with_arg("time_limit", json!(time_limit)),
                    config.seed,
                ));
                passes.push(fallback.when(Condition::LayoutUnset));
            }
        }
    }

    passes.push(
        PassSpec::analysis("FullAncillaAllocation")
            .with_arg("num_qubits", json!(coupling_map.num_qubits())),
    );
    passes.push(PassSpec::transformation("EnlargeWithAncilla"));
    passes.push(PassSpec::transformation("ApplyLayout"));
    Ok(Some(Stage::new(StageKind::Layout, passes)))
}

fn router(
    method: RoutingMethod,
    config: &PassManagerConfig,
    coupling_map: &CouplingMap,
    policy: &LevelPolicy,
) -> PassSpec {
    let pass = match method {
        RoutingMethod::Basic => PassSpec::transformation("BasicSwap"),
        RoutingMethod::Lookahead => PassSpec::transformation("LookaheadSwap")
            .with_arg("search_depth", json!(policy.lookahead_depth))
            .with_arg("search_width", json!(policy.lookahead_width)),
        RoutingMethod::Stochastic => seeded(
            PassSpec::transformation("StochasticSwap")
                .with_arg("trials", json!(policy.stochastic_trials)),
            config.seed,
        ),
        RoutingMethod::Sabre => seeded(
            PassSpec::transformation("SabreSwap")
                .with_arg("heuristic", json!(policy.sabre_heuristic)),
            config.seed,
        ),
        RoutingMethod::None => {
            return PassSpec::analysis("RaiseIfUnrouted")
                .with_arg(
                    "message",
                    json!("no routing method selected, but the circuit does not fit the connectivity graph"),
                )
                .when(Condition::NotMapped);
        }
    };
    pass.with_arg("coupling_map", edges(coupling_map))
        .when(Condition::NotMapped)
}

pub(crate) fn routing(
    config: &PassManagerConfig,
    policy: &LevelPolicy,
) -> CompileResult<Option<Stage>> {
    let Some(coupling_map) = &config.coupling_map else {
        return match config.routing_method {
            Some(method) if method != RoutingMethod::None => Err(missing(
                StageKind::Routing,
                DerivedField::Connectivity,
                format!("routing method '{method}' inserts swaps along a connectivity graph"),
            )),
            _ => Ok(None),
        };
    };

    let method = config.routing_method.unwrap_or(policy.routing);
    let mut passes =
        vec![PassSpec::analysis("CheckMap").with_arg("coupling_map", edges(coupling_map))];
    if method != RoutingMethod::None {
        passes.push(
            PassSpec::transformation("BarrierBeforeFinalMeasurements").when(Condition::NotMapped),
        );
    }
    passes.push(router(method, config, coupling_map, policy));
    Ok(Some(Stage::new(StageKind::Routing, passes)))
}

pub(crate) fn translation(
    config: &PassManagerConfig,
    policy: &LevelPolicy,
) -> CompileResult<Option<Stage>> {
    let Some(basis_gates) = &config.basis_gates else {
        if let Some(method) = config.translation_method {
            return Err(missing(
                StageKind::Translation,
                DerivedField::BasisGates,
                format!("translation method '{method}' rewrites into a basis gate set"),
            ));
        }
        return Ok(None);
    };

    let mut passes = match config.translation_method.unwrap_or(policy.translation) {
        TranslationMethod::Unroller => {
            vec![PassSpec::transformation("Unroller").with_arg("basis_gates", basis(basis_gates))]
        }
        TranslationMethod::Translator => vec![
            unitary_synthesis(config, basis_gates, Some(3)),
            PassSpec::transformation("UnrollCustomDefinitions")
                .with_arg("basis_gates", basis(basis_gates)),
            PassSpec::transformation("BasisTranslator").with_arg("basis_gates", basis(basis_gates)),
        ],
        TranslationMethod::Synthesis => vec![
            unitary_synthesis(config, basis_gates, Some(3)),
            PassSpec::transformation("Unroll3qOrMore"),
            PassSpec::analysis("Collect2qBlocks"),
            PassSpec::transformation("ConsolidateBlocks")
                .with_arg("basis_gates", basis(basis_gates)),
            unitary_synthesis(config, basis_gates, None),
        ],
    };

    if let Some(coupling_map) = config.coupling_map.as_ref().filter(|c| !c.is_symmetric()) {
        passes.push(
            PassSpec::analysis("CheckGateDirection").with_arg("coupling_map", edges(coupling_map)),
        );
        passes.push(
            PassSpec::transformation("GateDirection")
                .with_arg("coupling_map", edges(coupling_map))
                .when(Condition::DirectionMismatch),
        );
    }

    if let Some(inst_map) = config.inst_map.as_ref().filter(|m| !m.is_empty()) {
        let calibrated: Vec<&str> = inst_map.instructions().collect();
        passes.push(PassSpec::transformation("PulseGates").with_arg("calibrated", json!(calibrated)));
    }

    Ok(Some(Stage::new(StageKind::Translation, passes)))
}

pub(crate) fn scheduling(config: &PassManagerConfig) -> CompileResult<Option<Stage>> {
    let method = config.scheduling_method;
    if method.is_none() && !config.has_calibrations() {
        return Ok(None);
    }
    let Some(durations) = &config.instruction_durations else {
        let reason = match method {
            Some(method) => format!("scheduling method '{method}' needs instruction durations"),
            None => "calibrations are present, so the circuit is scheduled, which needs instruction durations".into(),
        };
        return Err(missing(StageKind::Scheduling, DerivedField::Durations, reason));
    };

    let mut passes = vec![PassSpec::transformation("TimeUnitConversion").with_arg("dt", json!(durations.dt()))];
    if let Some(method) = method {
        let scheduler = match method {
            SchedulingMethod::Alap => "ALAPScheduleAnalysis",
            SchedulingMethod::Asap => "ASAPScheduleAnalysis",
        };
        passes.push(PassSpec::analysis(scheduler));
        passes.push(PassSpec::transformation("PadDelay"));
    }
    if let Some(timing) = config.active_timing_constraints() {
        passes.push(
            PassSpec::analysis("ValidatePulseGates")
                .with_arg("granularity", json!(timing.granularity))
                .with_arg("min_length", json!(timing.min_length)),
        );
        if method.is_some() {
            passes.push(
                PassSpec::transformation("ConstrainedReschedule")
                    .with_arg("acquire_alignment", json!(timing.acquire_alignment))
                    .with_arg("pulse_alignment", json!(timing.pulse_alignment)),
            );
        }
    }
    Ok(Some(Stage::new(StageKind::Scheduling, passes)))
}
