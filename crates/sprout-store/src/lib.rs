//! SQLite-backed relational store for the Sprout backend
//!
//! One table per entity plus the `activity_students` association table.
//! Foreign keys are enforced by the database (`PRAGMA foreign_keys = ON`);
//! there is no application-level referential validation and no cascade
//! policy. Updates are partial: a patch carries only the fields to change.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod schema;
pub mod store;

mod activities;
mod attendance;
mod classes;
mod payments;
mod students;
mod teachers;
mod users;

pub use store::SproutStore;
pub use users::StoredUser;
