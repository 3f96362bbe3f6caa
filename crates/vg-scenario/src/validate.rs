//! Scenario validation logic.

use crate::schema::{ErrorKind, LATEST_VERSION, Scenario, Step};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Empty id in {context}")]
    EmptyId { context: String },

    #[error("Step {index} creates {id} without parents but does not expect no_parents")]
    MissingParents { index: usize, id: String },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.stem.is_empty() {
        return Err(ValidationError::EmptyId {
            context: "stem".to_string(),
        });
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        if step.ids().iter().any(|id| id.is_empty()) {
            return Err(ValidationError::EmptyId {
                context: format!("step {} ({})", index, step),
            });
        }

        if let Step::Create {
            id,
            parents,
            expect_error,
        } = step
        {
            if parents.is_empty() && *expect_error != Some(ErrorKind::NoParents) {
                return Err(ValidationError::MissingParents {
                    index,
                    id: id.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(steps: Vec<Step>) -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "test".into(),
            stem: "A".into(),
            steps,
        }
    }

    #[test]
    fn accepts_minimal_scenario() {
        assert!(validate_scenario(&scenario(vec![])).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut s = scenario(vec![]);
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_empty_ids() {
        let s = scenario(vec![Step::Connect {
            child: "B".into(),
            parent: String::new(),
            expect_error: None,
        }]);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::EmptyId { .. })
        ));
    }

    #[test]
    fn parentless_create_must_expect_failure() {
        let bare = Step::Create {
            id: "B".into(),
            parents: vec![],
            expect_error: None,
        };
        assert!(matches!(
            validate_scenario(&scenario(vec![bare])),
            Err(ValidationError::MissingParents { index: 0, .. })
        ));

        let declared = Step::Create {
            id: "B".into(),
            parents: vec![],
            expect_error: Some(ErrorKind::NoParents),
        };
        assert!(validate_scenario(&scenario(vec![declared])).is_ok());
    }
}
