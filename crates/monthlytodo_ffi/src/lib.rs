//! Flutter-facing bindings for MonthlyTodo core.

pub mod api;
