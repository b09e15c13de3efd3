//! Integration test suite for steep.
//!
//! These tests exercise the MVU core end to end at the message level -
//! selection, preparation, countdown, finish, reset, and the tea menu -
//! together with the persistence layer on temporary directories.
//!
//! No terminal is required: the render thread consumes immutable
//! snapshots, so everything observable lives on the model and the
//! snapshots it produces.

mod fixtures;

mod brew_flow;
mod persistence;
