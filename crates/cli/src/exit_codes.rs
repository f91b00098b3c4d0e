//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Domain     | Description                                        |
//! |------|------------|----------------------------------------------------|
//! | 0    | Universal  | Success                                            |
//! | 1    | Universal  | General error (unspecified)                        |
//! | 2    | Universal  | CLI usage error (bad args, bad criteria list)      |
//! | 3    | Input      | Employee or owner file could not be loaded         |
//! | 4    | Output     | Report could not be written                        |
//! | 5    | Config     | Config file unreadable, unparseable or invalid     |
//! | 6    | Matching   | Matches found (only with `--fail-on-match`)        |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Matching (3-6)
// =============================================================================

/// An input table could not be read, or lacks a required column.
pub const EXIT_LOAD: u8 = 3;

/// Writing the xlsx/csv/json report failed.
pub const EXIT_EXPORT: u8 = 4;

/// Config file missing, malformed, or failing validation.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// At least one match row was produced and `--fail-on-match` was set.
pub const EXIT_MATCHES_FOUND: u8 = 6;
