//! Spectral-file cache behavior and end-to-end format validation.

mod common;

use common::*;
use pvoc::{EngineParams, FrameReader, PvocError, SpectralCache};
use std::io::Write;
use std::sync::Arc;

#[test]
fn disk_load_is_idempotent() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pvoc.1");
    let stride = FRAME_SIZE + 2;
    let frames = vec![0.0f32; stride * 3];
    let bytes = pvoc::write_pvoc(SR, FRAME_SIZE, HOP, &frames);
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&bytes)
        .unwrap();
    let path = path.to_str().unwrap().to_string();

    let mut cache = SpectralCache::new();
    let first = cache.load(&path).unwrap();
    let second = cache.load(&path).unwrap();

    // Same handle, not just equal content: the file was read once.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.header(), second.header());
    assert_eq!(cache.len(), 1);

    // The cache hit survives the file disappearing from disk.
    std::fs::remove_file(&path).unwrap();
    let third = cache.load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn distinct_names_load_distinct_files() {
    let mut cache = SpectralCache::new();
    let a = cache.insert("pvoc.1", tone_file("pvoc.1", 16, 1.0, 2));
    let b = cache.insert("pvoc.2", tone_file("pvoc.2", 16, 1.0, 2));
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 2);
    assert_eq!(pvoc::numbered_name(2), "pvoc.2");
}

#[test]
fn numbered_load_resolves_the_conventional_name() {
    let mut cache = SpectralCache::new();
    let inserted = cache.insert("pvoc.3", tone_file("pvoc.3", 16, 1.0, 2));
    // A numeric file argument hits the same cache slot as the pvoc.N name.
    let loaded = cache.load_numbered(3).unwrap();
    assert!(Arc::ptr_eq(&inserted, &loaded));
    assert_eq!(cache.len(), 1);
}

#[test]
fn stereo_file_is_rejected_at_load() {
    let stride = FRAME_SIZE + 2;
    let frames = vec![0.0f32; stride];
    let bytes =
        pvoc::io::pvoc_file::write_pvoc_with_channels(SR, FRAME_SIZE, HOP, 2, &frames);
    let err = pvoc::PvocFile::parse("stereo", &bytes).unwrap_err();
    match err {
        PvocError::InvalidFormat(msg) => assert!(msg.contains("channels")),
        other => panic!("expected InvalidFormat, got {:?}", other),
    }
}

#[test]
fn reader_floor_is_looser_than_resynth_floor() {
    // A 512-point file is readable but too small for the resynthesis
    // consumers; the floors differ on purpose.
    use pvoc::FrameInterpolator;
    use std::cell::RefCell;
    use std::rc::Rc;

    let params = EngineParams::new(SR, BLOCK);
    let small = Arc::new(tone_file_sized("small", 512, 16, 1.0, 2));

    let reader = FrameReader::new(Arc::clone(&small), &params).unwrap();
    let reader = Rc::new(RefCell::new(reader));
    match FrameInterpolator::new(small, reader, &params) {
        Err(err) => assert!(matches!(err, PvocError::InvalidFormat(_))),
        Ok(_) => panic!("512-point frames should be below the resynthesis floor"),
    }
}

#[test]
fn oversized_control_block_fails_window_capacity() {
    use pvoc::CrossSynthesizer;
    use std::cell::RefCell;
    use std::rc::Rc;

    // 8192-sample blocks need a window half beyond the stored capacity.
    let params = EngineParams::new(SR, 8192);
    let file = Arc::new(tone_file_sized("big-block", 8192, 16, 1.0, 2));
    let reader = Rc::new(RefCell::new(
        FrameReader::new(Arc::clone(&file), &params).unwrap(),
    ));
    match CrossSynthesizer::new(file, reader, &params) {
        Err(PvocError::InvalidFormat(msg)) => assert!(msg.contains("window")),
        Err(other) => panic!("expected InvalidFormat, got {:?}", other),
        Ok(_) => panic!("oversized block should fail window validation"),
    }
}
