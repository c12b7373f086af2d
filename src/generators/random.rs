// src/generators/random.rs
//! Secure random selection from an alphabet.

use rand_core::{CryptoRng, RngCore};

use super::{GeneratorError, Result};

/// Draw `count` entries from `alphabet`.
///
/// One byte (0-255) is read from `rng` per entry and reduced with
/// `byte % alphabet.len()`. When the alphabet size is not a power of two
/// this favours the lower indices slightly: with 88 characters, indices
/// below 80 are hit 3 times out of 256 and the rest 2 times out of 256.
/// Callers and tests rely on this exact mapping.
///
/// The source must be a cryptographic RNG. Production code passes
/// [`rand::rngs::OsRng`].
pub fn select<'a, T, R>(rng: &mut R, alphabet: &'a [T], count: usize) -> Result<Vec<&'a T>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if alphabet.is_empty() {
        return Err(GeneratorError::Configuration(
            "Cannot select from an empty alphabet".to_string(),
        ));
    }

    let mut bytes = vec![0u8; count];
    rng.fill_bytes(&mut bytes);

    Ok(bytes
        .iter()
        .map(|byte| &alphabet[*byte as usize % alphabet.len()])
        .collect())
}


#[cfg(test)]
mod tests {
    use super::testing::FixedBytes;
    use super::*;

    #[test]
    fn maps_each_byte_modulo_alphabet_size() {
        let alphabet = ['a', 'b', 'c'];
        let mut rng = FixedBytes::new(&[0, 1, 2, 3, 4, 255]);

        let picked: String = select(&mut rng, &alphabet, 6).unwrap().into_iter().collect();
        // 255 % 3 == 0
        assert_eq!(picked, "abcaba");
    }

    #[test]
    fn preserves_draw_order() {
        let alphabet: Vec<u32> = (0..10).collect();
        let mut rng = FixedBytes::new(&[9, 8, 7, 19, 25]);

        let picked: Vec<u32> = select(&mut rng, &alphabet, 5)
            .unwrap()
            .into_iter()
            .copied()
            .collect();
        assert_eq!(picked, vec![9, 8, 7, 9, 5]);
    }

    #[test]
    fn zero_count_draws_nothing() {
        let mut rng = FixedBytes::new(&[1]);
        assert!(select(&mut rng, &['x'], 0).unwrap().is_empty());
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let mut rng = FixedBytes::new(&[1]);
        let empty: [char; 0] = [];
        assert!(select(&mut rng, &empty, 4).is_err());
    }

    #[test]
    fn os_rng_stays_within_alphabet() {
        let alphabet = ['x', 'y'];
        let picked = select(&mut rand::rngs::OsRng, &alphabet, 64).unwrap();
        assert_eq!(picked.len(), 64);
        assert!(picked.iter().all(|c| alphabet.contains(c)));
    }
}
