//! Benchmark workloads for the vessel containers.
//!
//! Deterministic, seed-driven inputs so that runs are comparable across
//! machines and commits:
//!
//! - [`insertion_positions`]: valid insert indices for a growing array
//! - [`erase_positions`]: valid erase indices for a shrinking array

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// SplitMix64 step. Small, fast and good enough for spreading indices.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// `count` insert positions for an array that starts at `initial_len` and
/// grows by one per insert. Position `i` lies in `[0, initial_len + i]`.
pub fn insertion_positions(initial_len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..count)
        .map(|i| (splitmix64(&mut state) % (initial_len + i + 1) as u64) as usize)
        .collect()
}

/// `count` erase positions for an array that starts at `initial_len` and
/// shrinks by one per erase. Position `i` lies in `[0, initial_len - i)`.
///
/// # Panics
///
/// Panics if `count > initial_len`.
pub fn erase_positions(initial_len: usize, count: usize, seed: u64) -> Vec<usize> {
    assert!(
        count <= initial_len,
        "cannot erase {count} values from {initial_len}"
    );
    let mut state = seed;
    (0..count)
        .map(|i| (splitmix64(&mut state) % (initial_len - i) as u64) as usize)
        .collect()
}
