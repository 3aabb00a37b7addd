//! Event-level properties of the download state machine: chunk-boundary
//! independence, capacity bounds, timeout handling, and the at-most-once
//! callback guarantee.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use pixelbean::crypto::{FrameEncryptor, VendorKeys};
use pixelbean::prelude::*;

const PREAMBLE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n";

/// Everything a finished download reported through its callbacks.
#[derive(Default)]
struct Outcome {
    successes: Vec<FileHeader>,
    errors: Vec<DownloadError>,
}

impl Outcome {
    fn total_callbacks(&self) -> usize {
        self.successes.len() + self.errors.len()
    }
}

fn start_download(config: &DecoderConfig) -> (Download, Arc<Mutex<Outcome>>) {
    let outcome = Arc::new(Mutex::new(Outcome::default()));
    let on_success = {
        let outcome = Arc::clone(&outcome);
        Box::new(move |header| outcome.lock().unwrap().successes.push(header))
    };
    let on_error = {
        let outcome = Arc::clone(&outcome);
        Box::new(move |error| outcome.lock().unwrap().errors.push(error))
    };
    let download = Download::start(
        StreamDecoder::new(config.clone()),
        &VendorKeys,
        on_success,
        on_error,
    );
    (download, outcome)
}

fn frame_fill(seed: u8, frame_size: usize) -> Vec<u8> {
    (0..frame_size)
        .map(|i| seed.wrapping_mul(31).wrapping_add((i % 17) as u8))
        .collect()
}

/// Wire stream: preamble, plaintext header, encrypted frames.
fn build_stream(header: FileHeader, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut wire = PREAMBLE.to_vec();
    wire.extend_from_slice(&[
        header.kind,
        header.total_frames,
        (header.speed_ms >> 8) as u8,
        header.speed_ms as u8,
    ]);
    let mut enc = FrameEncryptor::new(&VendorKeys);
    for frame in frames {
        wire.extend_from_slice(&enc.encrypt(frame));
    }
    wire
}

fn data(bytes: &[u8]) -> TransportEvent {
    TransportEvent::Data(bytes.to_vec())
}

#[test]
fn end_to_end_three_uneven_chunks() {
    let config = DecoderConfig::default();
    let frames = vec![
        frame_fill(3, config.frame_size()),
        frame_fill(7, config.frame_size()),
    ];
    // Header bytes on the wire: [0x01, 0x02, 0x12, 0x34].
    let header = FileHeader {
        kind: 1,
        total_frames: 2,
        speed_ms: 0x1234,
    };
    let wire = build_stream(header, &frames);

    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    // Three unevenly sized chunks: mid-preamble, mid-frame, remainder.
    let cuts = [17, PREAMBLE.len() + 4 + 700, wire.len()];
    let mut start = 0;
    for cut in cuts {
        assert_eq!(download.handle_event(&mut store, data(&wire[start..cut]), now), None);
        start = cut;
    }
    assert_eq!(download.state(), StreamState::Completed);

    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    let outcome = outcome.lock().unwrap();
    assert_eq!(outcome.successes, vec![header]);
    assert!(outcome.errors.is_empty());
    assert_eq!(store.frame(0).unwrap(), frames[0].as_slice());
    assert_eq!(store.frame(1).unwrap(), frames[1].as_slice());
}

#[test]
fn chunk_boundary_independence() {
    let config = DecoderConfig::default();
    let frames: Vec<Vec<u8>> = (0..5u8)
        .map(|i| frame_fill(i, config.frame_size()))
        .collect();
    let header = FileHeader {
        kind: 1,
        total_frames: 5,
        speed_ms: 120,
    };
    let wire = build_stream(header, &frames);
    let now = Instant::now();

    let mut reference: Option<Vec<u8>> = None;

    // Single chunk, byte-at-a-time, and a few prime-sized fragmentations
    // must all produce the identical frame store.
    for step in [wire.len(), 1, 3, 97, 769] {
        let (mut download, outcome) = start_download(&config);
        let mut store = FrameStore::new(&config);

        for chunk in wire.chunks(step) {
            download.handle_event(&mut store, data(chunk), now);
        }
        download.handle_event(&mut store, TransportEvent::Disconnect, now);

        assert_eq!(download.state(), StreamState::Completed, "step {step}");
        assert_eq!(outcome.lock().unwrap().successes.len(), 1, "step {step}");

        match &reference {
            None => reference = Some(store.as_bytes().to_vec()),
            Some(expected) => {
                assert_eq!(store.as_bytes(), expected.as_slice(), "step {step}")
            }
        }
    }
}

#[test]
fn oversized_container_is_skipped_without_success() {
    let config = DecoderConfig::default();
    let header = FileHeader {
        kind: 1,
        total_frames: 61,
        speed_ms: 100,
    };
    let wire = build_stream(header, &[]);

    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    // The decoder must ask for the transport to be closed right away.
    let command = download.handle_event(&mut store, data(&wire), now);
    assert_eq!(command, Some(TransportCommand::Close));
    assert_eq!(download.state(), StreamState::Skipped);

    // Further bytes are ignored; the disconnect reports the tagged cause.
    download.handle_event(&mut store, data(&[0u8; 512]), now);
    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    let outcome = outcome.lock().unwrap();
    assert!(outcome.successes.is_empty());
    assert_eq!(
        outcome.errors,
        vec![DownloadError::FrameCountExceeded { declared: 61, max: 60 }]
    );
}

#[test]
fn ack_timeout_then_disconnect_fires_exactly_one_callback() {
    let config = DecoderConfig::default();
    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    download.handle_event(&mut store, TransportEvent::AckTimeout, now);
    assert_eq!(download.state(), StreamState::TimedOut);

    // The original firmware double-fired on this path; the notifier latch
    // must swallow the trailing disconnect.
    download.handle_event(&mut store, TransportEvent::Disconnect, now);
    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    let outcome = outcome.lock().unwrap();
    assert_eq!(outcome.errors, vec![DownloadError::AckTimeout]);
    assert_eq!(outcome.total_callbacks(), 1);
}

#[test]
fn idle_timeout_forces_error_and_close() {
    let config = DecoderConfigBuilder::new()
        .idle_timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let t0 = Instant::now();

    // First poll arms the baseline without evaluating.
    assert_eq!(download.handle_event(&mut store, TransportEvent::IdlePoll, t0), None);

    // A byte at t0+5s resets the idle clock.
    download.handle_event(&mut store, data(&PREAMBLE[..10]), t0 + Duration::from_secs(5));
    assert_eq!(
        download.handle_event(
            &mut store,
            TransportEvent::IdlePoll,
            t0 + Duration::from_secs(12)
        ),
        None
    );

    // Silence past the threshold (measured from the byte, not the poll).
    let command = download.handle_event(
        &mut store,
        TransportEvent::IdlePoll,
        t0 + Duration::from_secs(16),
    );
    assert_eq!(command, Some(TransportCommand::Close));
    assert_eq!(download.state(), StreamState::Errored);

    download.handle_event(&mut store, TransportEvent::Disconnect, t0 + Duration::from_secs(16));
    let outcome = outcome.lock().unwrap();
    assert_eq!(outcome.errors, vec![DownloadError::IdleTimeout]);
    assert_eq!(outcome.total_callbacks(), 1);
}

#[test]
fn transport_error_surfaces_tagged_cause_on_disconnect() {
    let config = DecoderConfig::default();
    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    download.handle_event(&mut store, TransportEvent::Error(-4), now);
    assert_eq!(download.state(), StreamState::Errored);
    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    let outcome = outcome.lock().unwrap();
    assert_eq!(outcome.errors, vec![DownloadError::Transport(-4)]);
    assert_eq!(outcome.errors[0].legacy_code(), -1);
}

#[test]
fn early_disconnect_reports_generic_error() {
    let config = DecoderConfig::default();
    let frames = vec![frame_fill(1, config.frame_size())];
    let header = FileHeader {
        kind: 1,
        total_frames: 2,
        speed_ms: 100,
    };
    // Only one of the two declared frames is on the wire.
    let wire = build_stream(header, &frames);

    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    download.handle_event(&mut store, data(&wire), now);
    assert_eq!(download.state(), StreamState::DecodingFrames);
    assert_eq!(download.frames_decoded(), 1);

    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    let outcome = outcome.lock().unwrap();
    assert!(outcome.successes.is_empty());
    assert_eq!(outcome.errors, vec![DownloadError::Disconnected]);

    // The store holds the prefix that did decode.
    assert_eq!(store.frame(0).unwrap(), frames[0].as_slice());
}

#[test]
fn events_after_completion_never_refire_callbacks() {
    let config = DecoderConfig::default();
    let frames = vec![frame_fill(9, config.frame_size())];
    let header = FileHeader {
        kind: 2,
        total_frames: 1,
        speed_ms: 80,
    };
    let wire = build_stream(header, &frames);

    let (mut download, outcome) = start_download(&config);
    let mut store = FrameStore::new(&config);
    let now = Instant::now();

    download.handle_event(&mut store, data(&wire), now);
    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    // Late events in arbitrary order: all must no-op.
    download.handle_event(&mut store, TransportEvent::Error(-3), now);
    download.handle_event(&mut store, TransportEvent::AckTimeout, now);
    download.handle_event(&mut store, TransportEvent::IdlePoll, now + Duration::from_secs(60));
    download.handle_event(&mut store, data(&[0xFF; 64]), now);
    download.handle_event(&mut store, TransportEvent::Disconnect, now);

    assert_eq!(download.state(), StreamState::Completed);
    let outcome = outcome.lock().unwrap();
    assert_eq!(outcome.successes, vec![header]);
    assert!(outcome.errors.is_empty());
}
