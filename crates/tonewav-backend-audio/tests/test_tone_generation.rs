//! Tone generation integration tests.

use tonewav_backend_audio::wav::{extract_pcm_data, WavHeader};
use tonewav_backend_audio::{generate_to_path, play_file, synthesize, AudioError};
use tonewav_spec::{AudioParameters, ParamError, PeriodPolicy, ToneJob};

fn write_tone(dir: &std::path::Path, name: &str, duration: u32, rate: u32, freq: u32) -> Vec<u8> {
    let path = dir.join(name);
    let params = AudioParameters::new(duration, rate, freq).unwrap();
    generate_to_path(&ToneJob::new(&path, params).unwrap()).unwrap();
    std::fs::read(path).unwrap()
}

#[test]
fn test_reference_tone_file_size() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = write_tone(dir.path(), "senoidal.wav", 5, 44100, 440);

    assert_eq!(bytes.len(), 441_044);
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.data_size, 441_000);
    assert_eq!(header.chunk_size as usize, bytes.len() - 8);
}

#[test]
fn test_same_parameters_produce_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_tone(dir.path(), "a.wav", 2, 22050, 330);
    let b = write_tone(dir.path(), "b.wav", 2, 22050, 330);
    assert_eq!(a, b);
}

#[test]
fn test_degenerate_period_writes_silence() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = write_tone(dir.path(), "flat.wav", 1, 8000, 8000);
    let pcm = extract_pcm_data(&bytes).unwrap();
    assert_eq!(pcm.len(), 16000);
    assert!(pcm.iter().all(|&b| b == 0));
}

#[test]
fn test_file_samples_match_synthesis() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = write_tone(dir.path(), "tone.wav", 1, 16000, 440);
    let params = AudioParameters::new(1, 16000, 440).unwrap();
    let expected = synthesize(&params, PeriodPolicy::Legacy);

    let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded.as_slice(), &expected[..]);
}

#[test]
fn test_invalid_parameters_fail_before_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.wav");

    let err = AudioParameters::new(1, 0, 440).unwrap_err();
    assert!(matches!(err, ParamError::NonPositive { .. }));

    let err: AudioError = err.into();
    assert!(matches!(err, AudioError::InvalidParameter(_)));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_playback_replays_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = write_tone(dir.path(), "tone.wav", 1, 8000, 440);

    let mut sink = Vec::new();
    let copied = play_file(&dir.path().join("tone.wav"), &mut sink).unwrap();
    assert_eq!(copied, bytes.len() as u64);
    assert_eq!(sink, bytes);
}
