//! Replays a scenario against a fresh genealogy.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};
use vg_core::VgResult;
use vg_graph::VirusGenealogy;

use crate::ScenarioResult;
use crate::schema::{ErrorKind, Scenario, Step};
use crate::strain::Strain;
use crate::validate::validate_scenario;

/// What a single step produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Done,
    Flag { value: bool },
    Ids { ids: Vec<String> },
    Failed { error: ErrorKind, message: String },
}

impl Outcome {
    fn from_result<T>(result: VgResult<T>, ok: impl FnOnce(T) -> Outcome) -> Self {
        match result {
            Ok(value) => ok(value),
            Err(err) => Outcome::Failed {
                error: ErrorKind::of(&err),
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => f.write_str("ok"),
            Outcome::Flag { value } => write!(f, "{}", value),
            Outcome::Ids { ids } => write!(f, "[{}]", ids.join(", ")),
            Outcome::Failed { error, message } => write!(f, "{} ({})", error, message),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub outcome: Outcome,
    /// Why the outcome did not match the step's expectation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<String>,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// One virus of the final genealogy.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VirusEntry {
    pub id: String,
    pub children: Vec<String>,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScenarioReport {
    pub name: String,
    pub stem: String,
    pub steps: Vec<StepReport>,
    pub genealogy: Vec<VirusEntry>,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed()).count()
    }

    pub fn passed(&self) -> bool {
        self.failures() == 0
    }
}

/// Validate `scenario`, replay it step by step and report every outcome.
///
/// A step that fails its expectation does not stop the replay. A structural
/// inconsistency in the genealogy does, and is returned as an error.
pub fn run(scenario: &Scenario) -> ScenarioResult<ScenarioReport> {
    validate_scenario(scenario)?;
    info!(name = %scenario.name, steps = scenario.steps.len(), "replaying scenario");

    let mut genealogy: VirusGenealogy<Strain> = VirusGenealogy::new(&scenario.stem);
    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let outcome = execute(&mut genealogy, step);
        genealogy.validate()?;

        let mismatch = check(step, &outcome);
        debug!(index, step = %step, outcome = %outcome, passed = mismatch.is_none(), "step replayed");
        steps.push(StepReport {
            index,
            step: step.clone(),
            outcome,
            mismatch,
        });
    }

    Ok(ScenarioReport {
        name: scenario.name.clone(),
        stem: genealogy.stem_id(),
        steps,
        genealogy: describe(&genealogy)?,
    })
}

fn execute(genealogy: &mut VirusGenealogy<Strain>, step: &Step) -> Outcome {
    match step {
        Step::Create { id, parents, .. } => {
            Outcome::from_result(genealogy.create_multi(id, parents), |()| Outcome::Done)
        }
        Step::Connect { child, parent, .. } => {
            Outcome::from_result(genealogy.connect(child, parent), |()| Outcome::Done)
        }
        Step::Remove { id, .. } => {
            Outcome::from_result(genealogy.remove(id), |()| Outcome::Done)
        }
        Step::Exists { id, .. } => Outcome::Flag {
            value: genealogy.exists(id),
        },
        Step::Children { id, .. } => {
            Outcome::from_result(genealogy.children_of(id), |ids| Outcome::Ids { ids })
        }
        Step::Parents { id, .. } => {
            Outcome::from_result(genealogy.parents_of(id), |ids| Outcome::Ids { ids })
        }
    }
}

fn expected_value(step: &Step) -> Option<Outcome> {
    match step {
        Step::Exists {
            expect: Some(value),
            ..
        } => Some(Outcome::Flag { value: *value }),
        Step::Children {
            expect: Some(ids), ..
        }
        | Step::Parents {
            expect: Some(ids), ..
        } => Some(Outcome::Ids { ids: ids.clone() }),
        _ => None,
    }
}

fn check(step: &Step, outcome: &Outcome) -> Option<String> {
    match (step.expected_error(), outcome) {
        (Some(kind), Outcome::Failed { error, .. }) if *error == kind => None,
        (Some(kind), actual) => Some(format!("expected {} error, got {}", kind, actual)),
        (None, Outcome::Failed { message, .. }) => Some(format!("unexpected error: {}", message)),
        (None, actual) => match expected_value(step) {
            Some(expected) if expected != *actual => {
                Some(format!("expected {}, got {}", expected, actual))
            }
            _ => None,
        },
    }
}

fn describe(genealogy: &VirusGenealogy<Strain>) -> VgResult<Vec<VirusEntry>> {
    genealogy
        .ids()
        .map(|id| {
            Ok(VirusEntry {
                id: id.clone(),
                children: genealogy.children_of(id)?,
                parents: genealogy.parents_of(id)?,
            })
        })
        .collect()
}
