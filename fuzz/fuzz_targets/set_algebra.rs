#![no_main]

use libfuzzer_sys::fuzz_target;
use ordtree::model::{run_set_algebra_equivalence, SetAlgebraInput};

fuzz_target!(|input: SetAlgebraInput| run_set_algebra_equivalence(input));
