//! Unit tests for gesture-tree.

mod arbitration_tests;
mod settings_tests;
mod settings_watcher_tests;
