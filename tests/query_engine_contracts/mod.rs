//! Contract tests for the compilation stages.

mod binder_contract;
mod planner_contract;
