//! Process exit codes, taken from BSD `sysexits.h` so scripts can tell
//! bad input apart from a broken environment.

/// No command, or `config init` would overwrite a file.
pub const USAGE: i32 = 64;

/// The document is not UTF-8, not JSON, lacks its root member, or violates a node rule.
pub const DATAERR: i32 = 65;

/// The input file does not exist.
pub const NOINPUT: i32 = 66;

/// Reading input or writing a config file failed.
pub const IOERR: i32 = 74;

/// A settings layer (file or `LOOPTREE_*` variable) is invalid.
pub const CONFIG: i32 = 78;
