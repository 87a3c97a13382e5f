//! Streaming protocol properties checked against the `sha2` crate

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha256_simd::{state_to_bytes, sum256, Backend, Dispatcher, Sha256, BLOCK_SIZE, IV};

fn sha2_ref(data: &[u8]) -> [u8; 32] {
    use sha2::Digest as _;
    sha2::Sha256::digest(data).into()
}

proptest! {
    #[test]
    fn one_shot_matches_sha2(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(sum256(&data), sha2_ref(&data));
    }

    #[test]
    fn chunking_does_not_change_digest(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        steps in proptest::collection::vec(1usize..200, 1..32),
    ) {
        let mut engine = Sha256::new();
        let mut i = 0usize;
        let mut step = steps.iter().cycle();
        while i < data.len() {
            let end = data.len().min(i + step.next().copied().unwrap_or(1));
            engine.write(&data[i..end]);
            i = end;
        }
        prop_assert_eq!(engine.total_len(), data.len() as u64);
        prop_assert!(engine.buffered_len() < BLOCK_SIZE);
        prop_assert_eq!(engine.finalize(), sum256(&data));
    }

    #[test]
    fn summary_does_not_disturb_stream(
        head in proptest::collection::vec(any::<u8>(), 0..512),
        tail in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut engine = Sha256::new();
        engine.write(&head);
        let summary = engine.summarize();
        prop_assert_eq!(summary, sum256(&head));

        engine.write(&tail);
        let whole: Vec<u8> = head.iter().chain(tail.iter()).copied().collect();
        prop_assert_eq!(engine.finalize(), sum256(&whole));
    }
}

#[test]
fn test_every_split_around_padding_boundaries() {
    let data: Vec<u8> = (0..200u32).map(|i| (i as u8).wrapping_mul(31)).collect();
    for len in [0usize, 1, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129, 200] {
        let msg = &data[..len];
        let expected = sha2_ref(msg);
        for split in 0..=len {
            let (a, b) = msg.split_at(split);
            let mut engine = Sha256::new();
            engine.write(a);
            engine.write(b);
            assert_eq!(engine.finalize(), expected, "len={len} split={split}");
        }
    }
}

#[test]
fn test_seven_chunks_match_single_write() {
    let mut rng = StdRng::seed_from_u64(0x5eed_1000);
    let mut data = vec![0u8; 1000];
    rng.fill(&mut data[..]);

    let sizes = [1usize, 63, 64, 65, 128, 300, 379];
    assert_eq!(sizes.iter().sum::<usize>(), data.len());

    let mut chunked = Sha256::new();
    let mut offset = 0;
    for size in sizes {
        assert_eq!(chunked.write(&data[offset..offset + size]), size);
        offset += size;
    }

    let mut single = Sha256::new();
    single.write(&data);

    assert_eq!(chunked.finalize(), single.finalize());
}

#[test]
fn test_empty_writes_are_noops() {
    let mut engine = Sha256::new();
    assert_eq!(engine.write(&[]), 0);
    engine.write(b"abc");
    assert_eq!(engine.write(&[]), 0);
    assert_eq!(engine.total_len(), 3);
    assert_eq!(engine.buffered_len(), 3);
    assert_eq!(engine.finalize(), sum256(b"abc"));
}

#[test]
fn test_buffer_drains_on_full_block() {
    let mut engine = Sha256::new();
    engine.write(&[1u8; 40]);
    assert_eq!(engine.buffered_len(), 40);
    engine.write(&[2u8; 24]);
    assert_eq!(engine.buffered_len(), 0);
    engine.write(&[3u8; 130]);
    assert_eq!(engine.buffered_len(), 2);
    assert_eq!(engine.total_len(), 194);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut engine = Sha256::new();
    engine.write(&[0xaa; 100]);
    engine.reset();
    assert_eq!(engine.total_len(), 0);
    assert_eq!(engine.buffered_len(), 0);
    engine.write(b"abc");
    assert_eq!(engine.finalize(), sum256(b"abc"));
}

#[test]
fn test_sum_is_repeatable() {
    let mut engine = Sha256::new();
    engine.write(b"hello ");
    let first = engine.sum(&[]);
    let second = engine.sum(&[]);
    assert_eq!(first, second);

    engine.write(b"world");
    assert_eq!(engine.sum(&[]), sum256(b"hello world").to_vec());
    assert_eq!(engine.finalize(), sum256(b"hello world"));
}

#[test]
fn test_exact_multiple_adds_one_padding_block() {
    for blocks in 1..=3usize {
        let msg: Vec<u8> = (0..blocks * BLOCK_SIZE).map(|i| i as u8).collect();

        let mut padding = [0u8; BLOCK_SIZE];
        padding[0] = 0x80;
        padding[56..].copy_from_slice(&((msg.len() as u64) * 8).to_be_bytes());

        let mut state = IV;
        let dispatcher = Dispatcher::for_backend(Backend::Generic);
        dispatcher
            .try_compress(&mut state, &msg)
            .expect("whole blocks should compress");
        dispatcher
            .try_compress(&mut state, &padding)
            .expect("padding block should compress");

        assert_eq!(state_to_bytes(&state), sum256(&msg), "blocks={blocks}");
    }
}

#[test]
fn test_try_finalize_succeeds_for_well_formed_input() {
    for len in [0usize, 55, 56, 64, 1000] {
        let mut engine = Sha256::new();
        engine.write(&vec![0x5a; len]);
        let digest = engine
            .try_finalize()
            .expect("padding must end on a block boundary");
        assert_eq!(digest, sha2_ref(&vec![0x5a; len]));
    }
}
