//! Middleware and route guards.

pub mod rbac;
