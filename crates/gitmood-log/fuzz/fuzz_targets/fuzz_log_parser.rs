#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    for record in gitmood_log::parse_commit_output(&raw) {
        assert!(record.diff.is_none() || record.stats.is_none());
    }
});
