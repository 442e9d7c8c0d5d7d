//! Keeps the nmap MAC prefix table in sync with the IEEE OUI registry.
//!
//! * [`fetch`] retrieves the registry text.
//! * [`registry`] parses it into [`PrefixRecord`](ouiup_common::record::PrefixRecord)s.
//! * [`database`] reads and renders the installed prefix table.
//! * [`merge`] appends what the table is missing.
//! * [`install`] backs up and replaces the installed file.
//! * [`updater`] runs the stages in order.

pub mod database;
pub mod fetch;
pub mod install;
pub mod merge;
pub mod registry;
pub mod updater;
