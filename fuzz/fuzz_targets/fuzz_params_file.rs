#![no_main]

use libfuzzer_sys::fuzz_target;
use tonewav_cli::input::{parse_json, parse_text};
use tonewav_spec::{AudioParameters, MAX_DATA_BYTES};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing must never panic; accepted jobs must have consistent sizes.
        if let Ok(job) = parse_text(s) {
            let params = job.parameters();
            assert_eq!(params.file_bytes(), 44 + u64::from(params.data_bytes()));
        }
        if let Ok((job, _)) = parse_json(s) {
            let json = serde_json::to_string(&job).unwrap();
            assert!(json.contains("sample_rate_hz"));
        }
        // Deserialization goes through validation, so anything accepted fits
        // RIFF and survives a round trip unchanged.
        if let Ok(params) = serde_json::from_str::<AudioParameters>(s) {
            assert!(u64::from(params.data_bytes()) <= MAX_DATA_BYTES);
            let json = serde_json::to_string(&params).unwrap();
            let again: AudioParameters = serde_json::from_str(&json).unwrap();
            assert_eq!(params, again);
        }
    }
});
