//! Daily Ledger backend: REST surface, domain logic and interchangeable
//! storage adapters for a small income/expense tracker.

pub mod backend;
