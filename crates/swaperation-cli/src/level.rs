//! Level files: an architecture plus a circuit to route on it.
//!
//! ```yaml
//! name: Level 7
//! architecture:
//!   lattice: [3, 2]
//!   extra_edges: [[0, 6]]
//! circuit:
//!   random: { qubits: 7, depth: 2, seed: 999 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use swaperation_ir::{Architecture, Circuit, RandomCircuitConfig, random_circuit};
use tracing::debug;

/// Level file as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub architecture: ArchitectureSection,
    pub circuit: CircuitSpec,
}

/// Architecture of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureSection {
    #[serde(flatten)]
    pub topology: Topology,
    /// Edges added on top of the topology.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_edges: Vec<(u32, u32)>,
}

/// Base connectivity of an architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Edges(Vec<(u32, u32)>),
    Linear(u32),
    Star(u32),
    Full(u32),
    Lattice((u32, u32)),
}

/// Where a level's circuit comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitSpec {
    /// Inline OpenQASM 2.0 text.
    Qasm(String),
    /// OpenQASM file relative to the level file.
    File(String),
    /// Seeded random layered circuit.
    Random { qubits: u32, depth: u32, seed: u64 },
}

/// A loaded level.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub description: Option<String>,
    pub architecture: Architecture,
    pub circuit: Circuit,
}

impl Topology {
    pub fn build(&self) -> Result<Architecture> {
        let arch = match self {
            Topology::Edges(edges) => Architecture::from_edges(edges.iter().copied()),
            Topology::Linear(n) => Architecture::linear(*n),
            Topology::Star(n) => Architecture::star(*n),
            Topology::Full(n) => Architecture::full(*n),
            Topology::Lattice((rows, cols)) => Architecture::lattice(*rows, *cols),
        };
        Ok(arch?)
    }
}

impl ArchitectureSection {
    pub fn build(&self) -> Result<Architecture> {
        let base = self.topology.build()?;
        if self.extra_edges.is_empty() {
            return Ok(base);
        }
        Ok(base.with_extra_edges(self.extra_edges.iter().copied())?)
    }
}

impl Level {
    /// Load and build a level file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read level file: {}", path.display()))?;
        let file: LevelFile = serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Invalid level file: {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::build(file, base_dir).with_context(|| format!("In level {}", path.display()))
    }

    /// Build a level, resolving circuit files against `base_dir`.
    pub fn build(file: LevelFile, base_dir: &Path) -> Result<Self> {
        let architecture = file.architecture.build()?;
        let circuit = match &file.circuit {
            CircuitSpec::Qasm(source) => swaperation_qasm::parse_named(&file.name, source)?,
            CircuitSpec::File(rel) => {
                let path = base_dir.join(rel);
                let source = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read circuit: {}", path.display()))?;
                swaperation_qasm::parse_named(&file.name, &source)?
            }
            CircuitSpec::Random {
                qubits,
                depth,
                seed,
            } => random_circuit(&RandomCircuitConfig::new(*qubits, *depth, *seed))?,
        };
        if circuit.num_qubits() > architecture.num_qubits() {
            bail!(
                "circuit needs {} qubits but the architecture has {}",
                circuit.num_qubits(),
                architecture.num_qubits()
            );
        }
        debug!(
            level = %file.name,
            qubits = circuit.num_qubits(),
            physical = architecture.num_qubits(),
            gates = circuit.len(),
            "Loaded level"
        );
        Ok(Level {
            name: file.name,
            description: file.description,
            architecture,
            circuit,
        })
    }
}

/// Parse a command-line architecture spec.
///
/// Accepted forms: `linear:N`, `star:N`, `full:N`, `lattice:RxC` and
/// `edges:A-B,C-D,...`.
pub fn parse_arch_spec(spec: &str) -> Result<Architecture> {
    let Some((kind, arg)) = spec.split_once(':') else {
        bail!("Invalid architecture '{spec}': expected KIND:ARGS");
    };
    let count = || -> Result<u32> {
        arg.trim()
            .parse()
            .with_context(|| format!("Invalid qubit count in '{spec}'"))
    };
    let topology = match kind.trim().to_lowercase().as_str() {
        "linear" => Topology::Linear(count()?),
        "star" => Topology::Star(count()?),
        "full" => Topology::Full(count()?),
        "lattice" => {
            let (r, c) = arg
                .split_once(['x', 'X'])
                .with_context(|| format!("Invalid lattice '{spec}': expected ROWSxCOLS"))?;
            Topology::Lattice((
                r.trim().parse().with_context(|| format!("Invalid rows in '{spec}'"))?,
                c.trim().parse().with_context(|| format!("Invalid columns in '{spec}'"))?,
            ))
        }
        "edges" => {
            let edges = arg
                .split(',')
                .map(|pair| {
                    let (a, b) = pair
                        .split_once('-')
                        .with_context(|| format!("Invalid edge '{pair}': expected A-B"))?;
                    Ok((
                        a.trim().parse().with_context(|| format!("Invalid edge '{pair}'"))?,
                        b.trim().parse().with_context(|| format!("Invalid edge '{pair}'"))?,
                    ))
                })
                .collect::<Result<Vec<(u32, u32)>>>()?;
            Topology::Edges(edges)
        }
        other => bail!(
            "Unknown architecture kind: '{other}'. Available: linear, star, full, lattice, edges"
        ),
    };
    topology.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_yaml() {
        let yaml = "\
name: Level 7
architecture:
  lattice: [3, 2]
  extra_edges: [[0, 6]]
circuit:
  random: { qubits: 7, depth: 2, seed: 999 }
";
        let file: LevelFile = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(file.architecture.topology, Topology::Lattice((3, 2)));
        assert_eq!(file.architecture.extra_edges, vec![(0, 6)]);
        let level = Level::build(file, Path::new(".")).unwrap();
        assert_eq!(level.architecture.num_qubits(), 7);
        assert!(level.architecture.is_edge(6, 0));
        assert_eq!(level.circuit.num_qubits(), 7);
    }

    #[test]
    fn test_inline_qasm_level() {
        let yaml = r#"
name: first
architecture:
  edges: [[0, 1], [0, 2]]
circuit:
  qasm: |
    OPENQASM 2.0;
    include "qelib1.inc";
    qreg q[3];
    cx q[0],q[1];
    cx q[1],q[2];
"#;
        let file: LevelFile = serde_yaml_ng::from_str(yaml).unwrap();
        let level = Level::build(file, Path::new(".")).unwrap();
        assert_eq!(level.circuit.two_qubit_count(), 2);
        assert_eq!(level.architecture.edges().len(), 2);
    }

    #[test]
    fn test_circuit_too_wide() {
        let file = LevelFile {
            name: "wide".into(),
            description: None,
            architecture: ArchitectureSection {
                topology: Topology::Linear(3),
                extra_edges: vec![],
            },
            circuit: CircuitSpec::Random {
                qubits: 4,
                depth: 1,
                seed: 1,
            },
        };
        assert!(Level::build(file, Path::new(".")).is_err());
    }

    #[test]
    fn test_arch_specs() {
        assert_eq!(parse_arch_spec("linear:4").unwrap().num_qubits(), 4);
        assert_eq!(parse_arch_spec("star:5").unwrap().edges().len(), 4);
        assert_eq!(parse_arch_spec("full:4").unwrap().edges().len(), 6);
        assert_eq!(parse_arch_spec("lattice:2x3").unwrap().num_qubits(), 6);
        let arch = parse_arch_spec("edges:0-1, 0-2").unwrap();
        assert!(arch.is_edge(2, 0));
        assert!(!arch.is_edge(1, 2));
        assert!(parse_arch_spec("ring:4").is_err());
        assert!(parse_arch_spec("linear").is_err());
        assert!(parse_arch_spec("edges:0_1").is_err());
    }
}
