#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = treebor::decode::parse(data) {
        _ = format!("{value:?}");
        let bytes = treebor::encode::emit(&value);
        let (again, read) = treebor::decode::parse_prefix(&bytes).unwrap();
        assert_eq!(read, bytes.len());
        assert_eq!(again, value);
    }
});
