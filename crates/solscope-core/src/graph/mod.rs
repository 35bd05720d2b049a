//! Counterparty graph built from enriched transaction history

pub mod counterparty;

pub use counterparty::{CounterpartyGraph, GraphNode};
