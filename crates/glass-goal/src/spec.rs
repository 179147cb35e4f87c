//! Goal file schema.
//!
//! ```json
//! {
//!   "goal": "description string",
//!   "grid_size": [rows, cols],
//!   "required_node_types": [
//!     {
//!       "planning": "navigator",
//!       "controlling": "controller",
//!       "causal": "causal",
//!       "algo": { "type": "passthrough" },
//!       "problem_story": {},
//!       "onto": [],
//!       "json_target": {},
//!       "run": true,
//!       "belief": {}
//!     }
//!   ],
//!   "constraints": {}
//! }
//! ```
//!
//! Every field is optional. Missing or unrecognized values fall back to
//! defaults instead of failing the parse.

use crate::error::GoalError;
use glass_kernel::{Mapping, NodeKinds};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub const DEFAULT_GRID_SIZE: (usize, usize) = (4, 4);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSpec {
    #[serde(default)]
    pub goal: String,

    #[serde(default = "default_grid_size")]
    pub grid_size: (usize, usize),

    #[serde(default)]
    pub required_node_types: Vec<NodeSpec>,

    /// Carried through untouched; nothing interprets constraints yet.
    #[serde(default)]
    pub constraints: Value,
}

fn default_grid_size() -> (usize, usize) {
    DEFAULT_GRID_SIZE
}

impl Default for GoalSpec {
    fn default() -> Self {
        Self {
            goal: String::new(),
            grid_size: DEFAULT_GRID_SIZE,
            required_node_types: Vec::new(),
            constraints: Value::Null,
        }
    }
}

impl GoalSpec {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse a goal file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GoalError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GoalError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| GoalError::ParseJson {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn rows(&self) -> usize {
        self.grid_size.0
    }

    pub fn cols(&self) -> usize {
        self.grid_size.1
    }

    /// The belief every node starts from: `{ "goal": <goal text> }`.
    pub fn base_belief(&self) -> Mapping {
        let mut belief = Mapping::new();
        belief.insert("goal".to_string(), Value::String(self.goal.clone()));
        belief
    }
}

/// Description of one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub planning: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub controlling: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub causal: Option<String>,

    #[serde(default)]
    pub algo: AlgoSpec,

    #[serde(default)]
    pub problem_story: Mapping,
    #[serde(default)]
    pub onto: Vec<String>,
    #[serde(default)]
    pub json_target: Mapping,

    #[serde(default = "default_run")]
    pub run: bool,

    /// Extra initial belief, merged over the goal belief.
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub belief: Mapping,
}

fn default_run() -> bool {
    true
}

/// Accept any JSON value and keep it only if it is a string, so a tag or
/// type of the wrong shape falls back to its default instead of failing.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            planning: None,
            controlling: None,
            causal: None,
            algo: AlgoSpec::Passthrough,
            problem_story: Mapping::new(),
            onto: Vec::new(),
            json_target: Mapping::new(),
            run: true,
            belief: Mapping::new(),
        }
    }
}

impl NodeSpec {
    /// Tags resolved against the lookup tables, defaulting independently.
    pub fn kinds(&self) -> NodeKinds {
        NodeKinds::from_tags(
            self.planning.as_deref(),
            self.controlling.as_deref(),
            self.causal.as_deref(),
        )
    }
}

/// Which algorithm a node runs.
///
/// Parsed leniently: a missing or unrecognized `type` means passthrough,
/// and missing payload fields take empty defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "RawAlgoSpec", into = "RawAlgoSpec")]
pub enum AlgoSpec {
    /// Identity copy of the belief.
    #[default]
    Passthrough,

    /// Merge a fixed mapping over the belief.
    Merge { data: Mapping },

    /// A Rhai script evaluated with the belief bound to `j`.
    ///
    /// Trusted input only: the script runs sandboxed and bounded, but it is
    /// still arbitrary user logic.
    Inline { code: String },

    /// A function registered by name in an [`AlgorithmRegistry`].
    ///
    /// [`AlgorithmRegistry`]: crate::registry::AlgorithmRegistry
    Registered { name: String },
}

/// Default script for an `inline` spec without `code`: return the belief.
pub const IDENTITY_SCRIPT: &str = "j";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawAlgoSpec {
    #[serde(default, rename = "type", deserialize_with = "string_or_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<RawAlgoSpec> for AlgoSpec {
    fn from(raw: RawAlgoSpec) -> Self {
        match raw.kind.as_deref() {
            Some("merge") => Self::Merge {
                data: raw.data.unwrap_or_default(),
            },
            Some("inline") => Self::Inline {
                code: raw.code.unwrap_or_else(|| IDENTITY_SCRIPT.to_string()),
            },
            Some("registered") => Self::Registered {
                name: raw.name.unwrap_or_default(),
            },
            _ => Self::Passthrough,
        }
    }
}

impl From<AlgoSpec> for RawAlgoSpec {
    fn from(spec: AlgoSpec) -> Self {
        let mut raw = RawAlgoSpec::default();
        match spec {
            AlgoSpec::Passthrough => raw.kind = Some("passthrough".to_string()),
            AlgoSpec::Merge { data } => {
                raw.kind = Some("merge".to_string());
                raw.data = Some(data);
            }
            AlgoSpec::Inline { code } => {
                raw.kind = Some("inline".to_string());
                raw.code = Some(code);
            }
            AlgoSpec::Registered { name } => {
                raw.kind = Some("registered".to_string());
                raw.name = Some(name);
            }
        }
        raw
    }
}
