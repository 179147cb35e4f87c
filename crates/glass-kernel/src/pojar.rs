//! POJAR: the per-node configuration bundle.
//!
//! **P**roblem story, **O**nto, **J**son target, **A**lgo, **R**un.
//!
//! Only the algorithm and the run flag are consumed by the run cycle. The
//! problem story, onto tags and json target are carried verbatim for
//! callers and future goal-matching logic.

use crate::algorithm::{Algorithm, Passthrough};
use crate::state::Mapping;

pub struct Pojar {
    problem_story: Mapping,
    onto: Vec<String>,
    json_target: Mapping,
    algo: Box<dyn Algorithm>,
    run: bool,
}

impl Pojar {
    /// A bundle with the given algorithm, empty metadata, and running enabled.
    pub fn new(algo: impl Algorithm + 'static) -> Self {
        Self::from_boxed(Box::new(algo))
    }

    pub fn from_boxed(algo: Box<dyn Algorithm>) -> Self {
        Self {
            problem_story: Mapping::new(),
            onto: Vec::new(),
            json_target: Mapping::new(),
            algo,
            run: true,
        }
    }

    pub fn with_problem_story(mut self, problem_story: Mapping) -> Self {
        self.problem_story = problem_story;
        self
    }

    pub fn with_onto(mut self, onto: Vec<String>) -> Self {
        self.onto = onto;
        self
    }

    pub fn with_json_target(mut self, json_target: Mapping) -> Self {
        self.json_target = json_target;
        self
    }

    pub fn with_run(mut self, run: bool) -> Self {
        self.run = run;
        self
    }

    pub fn problem_story(&self) -> &Mapping {
        &self.problem_story
    }

    pub fn onto(&self) -> &[String] {
        &self.onto
    }

    pub fn json_target(&self) -> &Mapping {
        &self.json_target
    }

    pub fn algo(&self) -> &dyn Algorithm {
        self.algo.as_ref()
    }

    /// Whether the execution phase runs this node's algorithm.
    pub fn run(&self) -> bool {
        self.run
    }
}

impl Default for Pojar {
    fn default() -> Self {
        Self::new(Passthrough)
    }
}

impl std::fmt::Debug for Pojar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pojar")
            .field("problem_story", &self.problem_story)
            .field("onto", &self.onto)
            .field("json_target", &self.json_target)
            .field("algo", &self.algo.name())
            .field("run", &self.run)
            .finish()
    }
}
