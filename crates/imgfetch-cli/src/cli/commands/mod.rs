//! CLI command handlers, one file per command.

mod completions;
mod fetch;
mod fingerprint;
mod ledger;
mod verify;

pub use completions::{run_completions, run_man};
pub use fetch::run_fetch;
pub use fingerprint::run_fingerprint;
pub use ledger::run_ledger;
pub use verify::run_verify;
