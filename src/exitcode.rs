//! Process exit codes for `treeplan`, taken from BSD `sysexits.h`
//!
//! Only the codes that [`CliError::exit_code`](crate::cli::CliError::exit_code)
//! actually returns are listed.

/// Bad arguments, or a target path that is not a directory.
pub const USAGE: i32 = 64;

/// The layout itself is wrong: a rejected edit, or `fmt --check` on a
/// non-canonical structure file.
pub const DATAERR: i32 = 65;

/// Structure file missing.
pub const NOINPUT: i32 = 66;

/// Refused to create a project over an existing directory.
pub const CANTCREAT: i32 = 73;

/// Reading stdin, writing a structure file or creating directories failed.
pub const IOERR: i32 = 74;

/// Settings could not be loaded or rendered.
pub const CONFIG: i32 = 78;
