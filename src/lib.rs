//! Terminal tools for hierarchical data files.
//!
//! Two programs are built on this crate: `hist2txt`, which prints a
//! histogram as a fixed-width text table, and `shroot`, a small shell for
//! browsing the directories of a file with `ls`, `cd` and `find`.
//!
//! Files are reached through the traits in [`store`]; [`store::JsonFile`] is
//! the bundled backend. The shell itself is [`Interpreter`], the dumper is
//! [`dump::dump`].

pub mod builtin;
pub mod command;
pub mod dirmap;
pub mod dump;
pub mod env;
pub mod format;
pub mod glob;
mod interpreter;
pub mod io_adapters;
pub mod literal;
pub mod logging;
pub mod path;
pub mod session;
pub mod store;

/// The interactive shell; see [`Interpreter`].
pub use interpreter::Interpreter;
