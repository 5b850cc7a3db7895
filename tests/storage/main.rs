//! Integration tests for Layer 1: Storage
//!
//! Tests for entity registration, component stores, capability gating, and iteration.

mod components;
mod iteration;
