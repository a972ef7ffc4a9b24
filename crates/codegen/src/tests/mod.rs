//! Tests for hook generation

mod integration;
