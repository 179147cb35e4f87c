//! Node classification tags.
//!
//! Each node carries one tag from each of three closed sets. The tags are
//! descriptive only: nothing in the run cycle reads them. They show up in
//! node labels and in the rendered layout.
//!
//! Tag strings from goal files are resolved through explicit lookup tables.
//! An absent or unrecognized string resolves to the family's default
//! (`navigator`, `controller`, `causal`) rather than failing.

use serde::{Deserialize, Serialize};

/// How a node plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningType {
    #[default]
    Navigator,
    Planner,
    Scheduler,
}

/// How a node controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllingType {
    #[default]
    Controller,
    Regulator,
    Monitor,
}

/// How a node relates cause and effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausalType {
    #[default]
    Causal,
    Reactive,
    Predictive,
}

const PLANNING_TAGS: [(&str, PlanningType); 3] = [
    ("navigator", PlanningType::Navigator),
    ("planner", PlanningType::Planner),
    ("scheduler", PlanningType::Scheduler),
];

const CONTROLLING_TAGS: [(&str, ControllingType); 3] = [
    ("controller", ControllingType::Controller),
    ("regulator", ControllingType::Regulator),
    ("monitor", ControllingType::Monitor),
];

const CAUSAL_TAGS: [(&str, CausalType); 3] = [
    ("causal", CausalType::Causal),
    ("reactive", CausalType::Reactive),
    ("predictive", CausalType::Predictive),
];

fn lookup<T: Copy>(table: &[(&str, T)], tag: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(_, kind)| kind)
}

fn name_of<T: Copy + PartialEq>(table: &[(&'static str, T)], kind: T) -> &'static str {
    table
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|&(name, _)| name)
        .unwrap_or_default()
}

/// Shared behaviour of the three tag families.
pub trait NodeKind: Copy + Default + PartialEq {
    /// Resolve an exact tag string.
    fn from_tag(tag: &str) -> Option<Self>;

    /// The canonical tag string.
    fn as_str(self) -> &'static str;

    /// Resolve a possibly-absent tag string, falling back to the default.
    fn from_tag_or_default(tag: Option<&str>) -> Self {
        tag.and_then(Self::from_tag).unwrap_or_default()
    }

    /// Upper-cased first letter of the tag, used by layout rendering.
    fn initial(self) -> char {
        self.as_str()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(' ')
    }
}

impl NodeKind for PlanningType {
    fn from_tag(tag: &str) -> Option<Self> {
        lookup(&PLANNING_TAGS, tag)
    }

    fn as_str(self) -> &'static str {
        name_of(&PLANNING_TAGS, self)
    }
}

impl NodeKind for ControllingType {
    fn from_tag(tag: &str) -> Option<Self> {
        lookup(&CONTROLLING_TAGS, tag)
    }

    fn as_str(self) -> &'static str {
        name_of(&CONTROLLING_TAGS, self)
    }
}

impl NodeKind for CausalType {
    fn from_tag(tag: &str) -> Option<Self> {
        lookup(&CAUSAL_TAGS, tag)
    }

    fn as_str(self) -> &'static str {
        name_of(&CAUSAL_TAGS, self)
    }
}

impl std::fmt::Display for PlanningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ControllingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for CausalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three tags of one node, in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeKinds {
    pub planning: PlanningType,
    pub controlling: ControllingType,
    pub causal: CausalType,
}

impl NodeKinds {
    pub fn new(planning: PlanningType, controlling: ControllingType, causal: CausalType) -> Self {
        Self {
            planning,
            controlling,
            causal,
        }
    }

    /// Resolve all three tags from optional strings, defaulting each one
    /// independently.
    pub fn from_tags(
        planning: Option<&str>,
        controlling: Option<&str>,
        causal: Option<&str>,
    ) -> Self {
        Self {
            planning: PlanningType::from_tag_or_default(planning),
            controlling: ControllingType::from_tag_or_default(controlling),
            causal: CausalType::from_tag_or_default(causal),
        }
    }

    /// Three-letter code, e.g. `NCC` for navigator/controller/causal.
    pub fn code(&self) -> String {
        [
            self.planning.initial(),
            self.controlling.initial(),
            self.causal.initial(),
        ]
        .iter()
        .collect()
    }
}

impl std::fmt::Display for NodeKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.planning, self.controlling, self.causal)
    }
}
