//! Scenario tests over stub collaborators.

mod stubs;
