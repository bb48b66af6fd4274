use crate::resumes::{error::ResumeError, models::ApplicationStatus};

/// Transition rule for a resume's application status.
///
/// The six statuses form a nominal progression but recruiters may move a
/// resume to any of them; the single enforced invariant is that the target
/// must differ from the current status.
pub fn validate_transition(
    current: ApplicationStatus,
    target: ApplicationStatus,
) -> Result<(), ResumeError> {
    if current == target {
        return Err(ResumeError::InvalidTransition(format!(
            "resume is already in status {}",
            current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_status_is_rejected() {
        for status in ApplicationStatus::ALL {
            assert!(validate_transition(status, status).is_err());
        }
    }

    #[test]
    fn test_any_different_status_is_accepted() {
        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                if from != to {
                    assert!(
                        validate_transition(from, to).is_ok(),
                        "{} -> {} should be accepted",
                        from,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn test_backward_transitions_are_accepted() {
        assert!(
            validate_transition(ApplicationStatus::FinalPass, ApplicationStatus::Apply).is_ok()
        );
        assert!(
            validate_transition(ApplicationStatus::Interview2, ApplicationStatus::Drop).is_ok()
        );
    }

    fn status_strategy() -> impl Strategy<Value = ApplicationStatus> {
        prop_oneof![
            Just(ApplicationStatus::Apply),
            Just(ApplicationStatus::Drop),
            Just(ApplicationStatus::Pass),
            Just(ApplicationStatus::Interview1),
            Just(ApplicationStatus::Interview2),
            Just(ApplicationStatus::FinalPass),
        ]
    }

    proptest! {
        #[test]
        fn prop_transition_accepted_iff_status_changes(
            from in status_strategy(),
            to in status_strategy()
        ) {
            let result = validate_transition(from, to);
            if from == to {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
