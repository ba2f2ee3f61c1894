#![no_main]

use libfuzzer_sys::fuzz_target;
use ordtree::model::{run_cursor_equivalence, CursorInput};

fuzz_target!(|input: CursorInput| run_cursor_equivalence(input));
