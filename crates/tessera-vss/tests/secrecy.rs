//! Statistical check that sub-threshold share collections carry no
//! information about the secret: the marginal distribution of a share byte
//! is uniform whatever the secret is.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tessera_vss::{DecoderPolicy, ShamirPss};

const TRIALS: usize = 25_600;
// 255 degrees of freedom: mean 255, standard deviation ~22.6. A uniform
// sample stays far below this; any leak of the constant term blows past it.
const CHI_SQUARED_LIMIT: f64 = 350.0;

fn chi_squared_of_share_byte(secret: u8, seed: u64) -> f64 {
    let pss = ShamirPss::new(4, 3, DecoderPolicy::Erasure).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut counts = [0u32; 256];
    for _ in 0..TRIALS {
        let shares = pss.share(&mut rng, &[secret]).unwrap();
        counts[shares[0].y()[0] as usize] += 1;
    }

    let expected = TRIALS as f64 / 256.0;
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

#[test]
fn share_bytes_are_uniform_for_a_zero_secret() {
    assert!(chi_squared_of_share_byte(0x00, 71) < CHI_SQUARED_LIMIT);
}

#[test]
fn share_bytes_are_uniform_for_an_all_ones_secret() {
    assert!(chi_squared_of_share_byte(0xFF, 72) < CHI_SQUARED_LIMIT);
}

#[test]
fn sub_threshold_pairs_look_alike_across_secrets() {
    // Compare the joint byte-sum distribution of two shares (below the
    // threshold of three) for two different secrets; the distributions must
    // agree within statistical noise.
    let pss = ShamirPss::new(4, 3, DecoderPolicy::Erasure).unwrap();

    let collect = |secret: u8, seed: u64| -> [u32; 256] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = [0u32; 256];
        for _ in 0..TRIALS {
            let shares = pss.share(&mut rng, &[secret]).unwrap();
            counts[(shares[0].y()[0] ^ shares[1].y()[0]) as usize] += 1;
        }
        counts
    };

    let a = collect(0x00, 73);
    let b = collect(0xD7, 74);

    // two-sample chi-squared over the 256 cells
    let chi: f64 = a
        .iter()
        .zip(&b)
        .map(|(&x, &y)| {
            let x = x as f64;
            let y = y as f64;
            let total = x + y;
            if total == 0.0 {
                0.0
            } else {
                (x - y) * (x - y) / total
            }
        })
        .sum();
    assert!(chi < CHI_SQUARED_LIMIT, "chi-squared {chi} too large");
}
