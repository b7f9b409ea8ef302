//! Architecture compliance.

use swaperation_ir::{Architecture, Circuit};
use tracing::warn;

use crate::report::{ComplianceReport, Violation};

/// Check that every two-qubit gate of `routed` acts on an architecture edge.
pub fn check_compliance(routed: &Circuit, architecture: &Architecture) -> ComplianceReport {
    let mut checked = 0;
    for (index, gate) in routed.gates().iter().enumerate() {
        let Some((a, b)) = gate.pair() else { continue };
        checked += 1;
        if !architecture.is_edge(a.0, b.0) {
            warn!(index, pair = ?(a.0, b.0), "Routed gate violates architecture");
            return ComplianceReport {
                checked,
                violation: Some(Violation {
                    index,
                    pair: (a.0, b.0),
                }),
            };
        }
    }
    ComplianceReport {
        checked,
        violation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swaperation_ir::Gate;

    #[test]
    fn test_first_violation_reported() {
        let arch = Architecture::linear(3).unwrap();
        let ok = Circuit::with_gates("ok", 3, [Gate::cx(1, 0), Gate::cx(2, 1)]).unwrap();
        let report = check_compliance(&ok, &arch);
        assert!(report.is_compliant());
        assert_eq!(report.checked, 2);

        let bad = Circuit::with_gates(
            "bad",
            3,
            [Gate::cx(0, 1), Gate::cx(2, 0), Gate::cx(0, 2)],
        )
        .unwrap();
        let report = check_compliance(&bad, &arch);
        assert_eq!(report.violation, Some(Violation { index: 1, pair: (2, 0) }));
    }
}
