//! Swaperation interactive qubit routing
//!
//! This crate holds the routing engine: a state machine that replays a
//! normalized circuit onto the physical qubits of an [`Architecture`],
//! inserting SWAPs on request and refusing anything the hardware graph
//! does not allow.
//!
//! # Overview
//!
//! A [`RoutingSession`] starts in [`Stage::Placement`], where swaps are free
//! relabelings used to pick an initial layout. The first [`advance`] freezes
//! the layout and enters [`Stage::Routing`], where each swap must follow an
//! architecture edge and is emitted as three CX gates. When the last gate is
//! committed the session is [`Stage::Done`] and yields a [`RoutingOutcome`].
//!
//! Rejected requests ([`RouteError::InvalidSwapRequest`],
//! [`RouteError::GateNotRoutable`], ...) leave the session unchanged.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use swaperation_ir::{Architecture, Circuit, Gate};
//! use swaperation_route::{RoutingSession, Stage};
//!
//! let circuit = Circuit::with_gates("demo", 3, [Gate::cx(0, 1), Gate::cx(1, 2)]).unwrap();
//! let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
//! let mut session = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
//!
//! session.advance().unwrap();          // CX(0,1) on edge (0,1)
//! assert!(session.swap(1, 2).is_err()); // (1,2) is not an edge
//! session.swap(0, 2).unwrap();          // logical 2 moves to physical 0
//! session.advance().unwrap();          // CX(1,2) now on physical (1,0)
//!
//! assert_eq!(session.stage(), Stage::Done);
//! assert_eq!(session.num_swaps(), 1);
//! assert_eq!(session.gates_remaining(), 0);
//! ```
//!
//! [`Architecture`]: swaperation_ir::Architecture
//! [`advance`]: RoutingSession::advance

pub mod driver;
pub mod error;
pub mod ledger;
pub mod mapping;
pub mod score;
pub mod session;
pub mod shared;
pub mod snapshot;
pub mod summary;

pub use driver::route_greedily;
pub use error::{RouteError, RouteResult};
pub use ledger::GateAdjacencyLedger;
pub use mapping::{Mapping, apply_swap, compose, perm_diff};
pub use score::Progress;
pub use session::{AdvanceOutcome, PendingGate, RoutingSession, Stage, SwapOutcome};
pub use shared::SharedSession;
pub use snapshot::SessionSnapshot;
pub use summary::{RoutingOutcome, RoutingSummary};
