//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: EntityHandle, ComponentMask, tags, and Error.

mod masks;
mod tags;
