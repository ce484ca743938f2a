//! Test modules for objtool-io
//!
//! File based tests for the OBJ codec: round trips through real files and
//! failure reporting for unreadable or unwritable paths.
