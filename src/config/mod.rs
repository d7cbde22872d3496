//! Action configuration
//!
//! GitHub exposes the trigger context as `GITHUB_*` variables and the action
//! inputs as `INPUT_*` variables. [`ConfigResolver`] turns them into a single
//! immutable [`Config`] that every pipeline step receives explicitly.
//!
//! Resolution happens in two phases: [`ConfigResolver::trigger`] reads only
//! the event context so the pull-request guard can run before any other
//! input (notably the token, which fork pull requests never receive) is
//! required.

mod env;
mod resolver;


pub use env::{MockVarEnv, RealVarEnv, VarEnv};
pub use resolver::{
    branch_from_ref, Config, ConfigResolver, Trigger, DEFAULT_CONVERTER, DEFAULT_OUTPUT_DIR,
    PULL_REQUEST_EVENT,
};
