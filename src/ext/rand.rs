use rand::SeedableRng;

pub type XoshiroRng = rand_xoshiro::Xoshiro256PlusPlus;

/// Inits random number generator from an optional seed.
pub fn init_rng(seed: Option<u64>) -> XoshiroRng {
    if let Some(seed) = seed {
        if seed.count_ones() < 5 {
            log::warn!("Seed ({}) is too simple, consider using a more random number.", seed);
        }
        XoshiroRng::seed_from_u64(seed)
    } else {
        let mut buffer = [0_u8; 8];
        match getrandom::getrandom(&mut buffer) {
            Ok(()) => XoshiroRng::seed_from_u64(u64::from_le_bytes(buffer)),
            Err(e) => {
                log::warn!("Could not obtain system randomness ({}), seeding from the clock", e);
                XoshiroRng::seed_from_u64(chrono::Local::now().timestamp_nanos_opt().unwrap_or(0) as u64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut rng1 = init_rng(Some(0x5f3a_92c1_7e44_b0d9));
        let mut rng2 = init_rng(Some(0x5f3a_92c1_7e44_b0d9));
        for _ in 0..10 {
            assert_eq!(rng1.gen_range(1..=10000_u32), rng2.gen_range(1..=10000_u32));
        }
    }
}
