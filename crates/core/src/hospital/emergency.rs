//! Emergency room case lifecycle.

define_choice! {
    /// Five-level triage scale.
    TriageLevel("triage level") {
        Resuscitation = "resuscitation",
        Emergent = "emergent",
        Urgent = "urgent",
        LessUrgent = "less_urgent",
        NonUrgent = "non_urgent",
    }
}

impl TriageLevel {
    /// Target time to treatment in minutes (`None` for non-urgent).
    pub fn target_minutes(self) -> Option<u32> {
        match self {
            TriageLevel::Resuscitation => Some(0),
            TriageLevel::Emergent => Some(15),
            TriageLevel::Urgent => Some(60),
            TriageLevel::LessUrgent => Some(120),
            TriageLevel::NonUrgent => None,
        }
    }
}

define_states! {
    EmergencyState("emergency case") {
        Arrived = "arrived",
        Triaged = "triaged",
        InTreatment = "in_treatment",
        Admitted = "admitted",
        Discharged = "discharged",
        Transferred = "transferred",
    }
    transitions {
        Arrived => [Triaged, InTreatment],
        Triaged => [InTreatment],
        InTreatment => [Admitted, Discharged, Transferred],
        Admitted => [Discharged, Transferred],
        Discharged => [],
        Transferred => [],
    }
}

impl EmergencyState {
    /// Whether the case leaves the emergency room with this state.
    pub fn closes_case(self) -> bool {
        matches!(self, EmergencyState::Discharged | EmergencyState::Transferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::StateMachine;

    #[test]
    fn treatment_may_start_without_triage() {
        assert!(EmergencyState::Arrived.can_transition(EmergencyState::InTreatment));
        assert!(EmergencyState::Triaged.can_transition(EmergencyState::InTreatment));
    }

    #[test]
    fn arrived_case_cannot_be_discharged_directly() {
        let err = EmergencyState::Arrived
            .transition(EmergencyState::Discharged)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot move emergency case from 'arrived' to 'discharged'"
        );
    }

    #[test]
    fn closing_states_are_terminal() {
        for state in EmergencyState::ALL {
            assert_eq!(state.closes_case(), state.is_terminal(), "{state}");
        }
    }

    #[test]
    fn triage_targets() {
        assert_eq!(TriageLevel::Emergent.target_minutes(), Some(15));
        assert_eq!(TriageLevel::NonUrgent.target_minutes(), None);
        assert_eq!("less_urgent".parse::<TriageLevel>().unwrap(), TriageLevel::LessUrgent);
    }
}
