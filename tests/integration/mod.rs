//! Integration Tests Module
//!
//! End-to-end tests for the assistant flows and the action layer, driven by
//! the scripted mock provider and the in-memory session store. No network
//! calls are made.

// Shared fixtures and helpers
mod common;



// Plan flow tests
mod plan_test;

// Action layer envelope tests
mod actions_test;
