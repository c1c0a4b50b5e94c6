#![no_main]
use libfuzzer_sys::fuzz_target;
use ts_columnar::RowEncoder;
use ts_columnar_fuzz::RleInput;

fuzz_target!(|input: RleInput| {
    let column = input.build();
    for &probe in input.probes.iter() {
        let row_id = probe as i64;
        assert_eq!(
            column.key_from_row_id(row_id),
            column.key_from_row_id_fast(row_id)
        );
        assert_eq!(
            column.reconstruct_row(row_id).is_ok(),
            row_id >= 1 && row_id as usize <= column.len()
        );
    }
    for run in column.runs() {
        assert_eq!(
            column.count_of_key(&run.key).unwrap(),
            column.count_of_key_fast(&run.key).unwrap()
        );
    }
});
