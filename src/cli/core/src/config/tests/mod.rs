/* src/cli/core/src/config/tests/mod.rs */

use super::*;

mod parsing;
mod validation;
