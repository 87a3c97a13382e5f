//! Independent hashers on separate threads

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha256_simd::{sum256, Sha256};

fn random_input(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

#[test]
fn test_two_instances_on_separate_threads() {
    let first = random_input(1, 10_000);
    let second = random_input(2, 7_777);
    let expected = (sum256(&first), sum256(&second));

    let digests = std::thread::scope(|s| {
        let a = s.spawn(|| {
            let mut engine = Sha256::new();
            for chunk in first.chunks(97) {
                engine.write(chunk);
            }
            engine.finalize()
        });
        let b = s.spawn(|| {
            let mut engine = Sha256::new();
            for chunk in second.chunks(13) {
                engine.write(chunk);
            }
            engine.finalize()
        });
        (
            a.join().expect("first hasher thread panicked"),
            b.join().expect("second hasher thread panicked"),
        )
    });

    assert_eq!(digests, expected);
}

#[test]
fn test_summary_unaffected_by_later_writes_on_another_thread() {
    let data = random_input(3, 4096);

    let mut engine = Sha256::new();
    engine.write(&data[..1000]);
    let summary = engine.sum(&[]);

    let finished = std::thread::spawn(move || {
        engine.write(&data[1000..]);
        engine.finalize()
    })
    .join()
    .expect("hasher thread panicked");

    assert_eq!(summary, sum256(&random_input(3, 4096)[..1000]).to_vec());
    assert_eq!(finished, sum256(&random_input(3, 4096)));
}

#[test]
fn test_many_threads_share_global_dispatcher() {
    let inputs: Vec<Vec<u8>> = (0..8).map(|i| random_input(100 + i, 1000 + i as usize * 37)).collect();

    let digests: Vec<[u8; 32]> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| s.spawn(move || sum256(input)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("hasher thread panicked"))
            .collect()
    });

    for (input, digest) in inputs.iter().zip(digests) {
        assert_eq!(digest, sum256(input));
    }
}
