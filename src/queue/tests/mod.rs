//! Test modules for the queue system
//!
//! This module organizes all the test suites for the blocking message queue.
//! Tests are organized by functional area for better maintainability.

mod lifecycle;
