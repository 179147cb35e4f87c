//! Inline algorithms: small Rhai scripts embedded in goal files.
//!
//! The script sees the node's belief as an object map bound to `j` and must
//! evaluate to an object map, which becomes the measurement:
//!
//! ```text
//! j.status = "seen"; j
//! ```
//!
//! Scripts are compiled once when the goal is assembled. The engine is
//! bounded (operation count, nesting depth, collection sizes) and has no
//! access to the file system or to module imports; `print`/`debug` go to
//! the log instead of stdout.

use glass_kernel::state::{as_mapping, kind_name};
use glass_kernel::{Algorithm, AlgorithmError, Mapping};
use rhai::module_resolvers::DummyModuleResolver;
use rhai::{AST, Dynamic, Engine, EvalAltResult, Scope};
use serde_json::Value;

use crate::error::GoalError;

/// Name the belief is bound to inside a script.
pub const BELIEF_VAR: &str = "j";

const MAX_OPERATIONS: u64 = 100_000;
const MAX_EXPR_DEPTH: usize = 64;
const MAX_FN_EXPR_DEPTH: usize = 32;
const MAX_CALL_LEVELS: usize = 32;
const MAX_STRING_SIZE: usize = 64 * 1024;
const MAX_COLLECTION_SIZE: usize = 10_000;

pub struct InlineAlgorithm {
    engine: Engine,
    ast: AST,
    source: String,
}

impl InlineAlgorithm {
    /// Compile `source` in a sandboxed engine.
    pub fn compile(source: &str) -> Result<Self, GoalError> {
        let engine = sandboxed_engine();
        let ast = engine
            .compile(source)
            .map_err(|err| GoalError::InlineCompile {
                message: err.to_string(),
            })?;
        Ok(Self {
            engine,
            ast,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn sandboxed_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FN_EXPR_DEPTH);
    engine.set_max_call_levels(MAX_CALL_LEVELS);
    engine.set_max_string_size(MAX_STRING_SIZE);
    engine.set_max_array_size(MAX_COLLECTION_SIZE);
    engine.set_max_map_size(MAX_COLLECTION_SIZE);
    engine.set_module_resolver(DummyModuleResolver::new());
    engine.disable_symbol("eval");
    engine.on_print(|text| tracing::info!(target: "glass::inline", "{text}"));
    engine.on_debug(|text, _source, pos| {
        tracing::debug!(target: "glass::inline", %pos, "{text}");
    });
    engine
}

fn script_error(err: Box<EvalAltResult>) -> AlgorithmError {
    AlgorithmError::Script(err.to_string())
}

impl Algorithm for InlineAlgorithm {
    fn name(&self) -> &str {
        "inline"
    }

    fn measure(&self, belief: &Mapping) -> Result<Mapping, AlgorithmError> {
        let mut scope = Scope::new();
        scope.push(BELIEF_VAR, rhai::serde::to_dynamic(belief).map_err(script_error)?);

        let result: Dynamic = self
            .engine
            .eval_ast_with_scope(&mut scope, &self.ast)
            .map_err(script_error)?;
        let value: Value = rhai::serde::from_dynamic(&result).map_err(script_error)?;

        let found = kind_name(&value).to_string();
        as_mapping(value).ok_or(AlgorithmError::NonMappingResult { found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn belief() -> Mapping {
        as_mapping(json!({"goal": "g", "n": 1})).unwrap()
    }

    #[test]
    fn identity_script_copies_belief() {
        let algo = InlineAlgorithm::compile("j").unwrap();
        assert_eq!(algo.measure(&belief()).unwrap(), belief());
    }

    #[test]
    fn script_can_add_and_update_keys() {
        let algo = InlineAlgorithm::compile(r#"j.status = "seen"; j.n += 1; j"#).unwrap();
        let measured = algo.measure(&belief()).unwrap();
        assert_eq!(
            Value::Object(measured),
            json!({"goal": "g", "n": 2, "status": "seen"})
        );
    }

    #[test]
    fn script_can_build_a_fresh_map() {
        let algo = InlineAlgorithm::compile(r#"#{ echo: j.goal }"#).unwrap();
        let measured = algo.measure(&belief()).unwrap();
        assert_eq!(Value::Object(measured), json!({"echo": "g"}));
    }

    #[test]
    fn compile_errors_surface_at_build_time() {
        let err = InlineAlgorithm::compile("j.").err().unwrap();
        assert!(matches!(err, GoalError::InlineCompile { .. }));
    }

    #[test]
    fn runtime_errors_become_script_errors() {
        let algo = InlineAlgorithm::compile(r#"throw "nope""#).unwrap();
        let err = algo.measure(&belief()).unwrap_err();
        assert!(matches!(err, AlgorithmError::Script(ref m) if m.contains("nope")));
    }

    #[test]
    fn non_map_results_are_rejected() {
        let algo = InlineAlgorithm::compile("42").unwrap();
        assert_eq!(
            algo.measure(&belief()).unwrap_err(),
            AlgorithmError::NonMappingResult {
                found: "number".to_string()
            }
        );
    }

    #[test]
    fn runaway_scripts_are_cut_off() {
        let algo = InlineAlgorithm::compile("loop { }").unwrap();
        assert!(matches!(
            algo.measure(&belief()).unwrap_err(),
            AlgorithmError::Script(_)
        ));
    }

    #[test]
    fn imports_resolve_nothing() {
        let algo = InlineAlgorithm::compile(r#"import "secrets" as s; j"#).unwrap();
        assert!(algo.measure(&belief()).is_err());
    }

    #[test]
    fn eval_is_disabled() {
        assert!(InlineAlgorithm::compile(r#"eval("40 + 2")"#).is_err());
    }
}
