//! Seeded random circuit generation.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Shape of a random circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomCircuitConfig {
    /// Number of qubits.
    pub qubits: u32,
    /// Number of layers.
    pub depth: u32,
    /// RNG seed. The same seed always yields the same circuit.
    pub seed: u64,
    /// Largest gate arity drawn (1 to 3).
    #[serde(default = "default_max_operands")]
    pub max_operands: u32,
}

fn default_max_operands() -> u32 {
    3
}

impl RandomCircuitConfig {
    /// Config with the default maximum arity.
    pub fn new(qubits: u32, depth: u32, seed: u64) -> Self {
        Self {
            qubits,
            depth,
            seed,
            max_operands: default_max_operands(),
        }
    }
}

/// Generate the input instructions of a random layered circuit.
///
/// Each layer shuffles the qubits and carves them into groups of one to
/// `max_operands` qubits; every group receives one gate of matching arity
/// with uniformly drawn angles.
pub fn random_instructions(config: &RandomCircuitConfig) -> Vec<Instruction> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);
    let max_operands = config.max_operands.clamp(1, 3);
    let mut qubits: Vec<QubitId> = (0..config.qubits).map(QubitId).collect();
    let mut out = Vec::new();

    for _ in 0..config.depth {
        qubits.shuffle(&mut rng);
        let mut rest = qubits.as_slice();
        while !rest.is_empty() {
            let limit = max_operands.min(rest.len() as u32);
            let arity = rng.gen_range(1..=limit) as usize;
            let (group, tail) = rest.split_at(arity);
            out.push(Instruction::new(random_gate(&mut rng, arity), group.iter().copied()));
            rest = tail;
        }
    }
    out
}

/// Generate and normalize a random layered circuit.
pub fn random_circuit(config: &RandomCircuitConfig) -> IrResult<Circuit> {
    let name = format!("random_{}x{}_s{}", config.qubits, config.depth, config.seed);
    Circuit::from_instructions(name, config.qubits, &random_instructions(config))
}

fn angle<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..2.0 * PI)
}

fn random_gate<R: Rng>(rng: &mut R, arity: usize) -> StandardGate {
    match arity {
        1 => {
            let pick = rng.gen_range(0..12);
            match pick {
                0 => StandardGate::I,
                1 => StandardGate::X,
                2 => StandardGate::Y,
                3 => StandardGate::Z,
                4 => StandardGate::H,
                5 => StandardGate::S,
                6 => StandardGate::T,
                7 => StandardGate::SX,
                8 => StandardGate::Rx(angle(rng)),
                9 => StandardGate::Ry(angle(rng)),
                10 => StandardGate::Rz(angle(rng)),
                _ => StandardGate::U(angle(rng), angle(rng), angle(rng)),
            }
        }
        2 => {
            let pick = rng.gen_range(0..7);
            match pick {
                0 => StandardGate::CX,
                1 => StandardGate::CY,
                2 => StandardGate::CZ,
                3 => StandardGate::CH,
                4 => StandardGate::Swap,
                5 => StandardGate::CRz(angle(rng)),
                _ => StandardGate::CP(angle(rng)),
            }
        }
        _ => StandardGate::CCX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_circuit() {
        let config = RandomCircuitConfig::new(5, 3, 123);
        assert_eq!(random_circuit(&config).unwrap(), random_circuit(&config).unwrap());
    }

    #[test]
    fn test_every_qubit_used_each_layer() {
        let config = RandomCircuitConfig::new(6, 4, 7);
        let insts = random_instructions(&config);
        let touched: usize = insts.iter().map(|i| i.qubits.len()).sum();
        assert_eq!(touched, 6 * 4);
    }

    #[test]
    fn test_max_operands_respected() {
        let config = RandomCircuitConfig {
            max_operands: 2,
            ..RandomCircuitConfig::new(8, 5, 99)
        };
        assert!(random_instructions(&config).iter().all(|i| i.qubits.len() <= 2));
    }
}
