#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
//! toastscan -- Finds notification ("toast") calls in JavaScript and TypeScript sources.

mod argparse;
pub mod extract;
pub mod lexer;
pub mod options;
pub mod psi;
pub mod report;
mod run;
pub mod walk;

pub use run::{find_call_sites, run};
