//! Behavioural test suites for the daemon.

mod support;
