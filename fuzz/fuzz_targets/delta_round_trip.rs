#![no_main]
use libfuzzer_sys::fuzz_target;
use ts_columnar_fuzz::DeltaInput;

fuzz_target!(|input: DeltaInput| {
    let column = input.build();
    assert!(column.verify_correctness());
});
