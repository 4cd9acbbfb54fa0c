#![no_main]

use libfuzzer_sys::{fuzz_target, Corpus};
use libmoltp::{prove, RawFormula};

fuzz_target!(|data: &str| -> Corpus {
    let raw = RawFormula {
        oid: 0,
        formula: data.to_owned(),
    };

    match prove(&raw) {
        Ok(_) => Corpus::Keep,
        Err(_) => Corpus::Reject,
    }
});
