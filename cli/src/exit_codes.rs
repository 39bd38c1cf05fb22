//! CLI exit codes
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success                                                  |
//! | 1    | General error (I/O, serialization)                       |
//! | 2    | Usage error (bad arguments, unreadable policy/config)    |
//! | 3    | `--fail-on-persistent` given and persistent alerts exist |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid input file or config.
pub const EXIT_USAGE: u8 = 2;

/// Persistent alerts remain and the caller asked to fail on them.
pub const EXIT_PERSISTENT_ALERTS: u8 = 3;
