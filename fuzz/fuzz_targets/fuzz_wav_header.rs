#![no_main]

use libfuzzer_sys::fuzz_target;
use tonewav_backend_audio::wav::{extract_pcm_data, WavHeader};

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must never panic.
    if let Ok(header) = WavHeader::parse(data) {
        let pcm = extract_pcm_data(data).unwrap();
        assert_eq!(pcm.len() as u64, u64::from(header.data_size));
        assert!(header.file_bytes() <= data.len() as u64);
    }
});
