//! Order policy: which pair follows the current one on advance

use crate::error::{PairsError, PairsResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderMode {
    #[default]
    Random,
    Sequential,
}

impl OrderMode {
    pub fn from_random_flag(random_order: bool) -> Self {
        if random_order {
            OrderMode::Random
        } else {
            OrderMode::Sequential
        }
    }
}

/// Pick the index of the next pair.
///
/// Random mode draws uniformly from `[0, len)` excluding `current`.
/// A single-element list stays on `current`. An empty list is an error.
pub fn pick_next_index<R: Rng + ?Sized>(
    current: usize,
    len: usize,
    mode: OrderMode,
    rng: &mut R,
) -> PairsResult<usize> {
    match len {
        0 => Err(PairsError::InvalidState("empty pair list".to_string())),
        1 => Ok(current),
        _ => match mode {
            OrderMode::Sequential => Ok((current + 1) % len),
            OrderMode::Random => loop {
                let idx = rng.gen_range(0..len);
                if idx != current {
                    break Ok(idx);
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sequential_wraps() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_next_index(0, 3, OrderMode::Sequential, &mut rng).unwrap(), 1);
        assert_eq!(pick_next_index(2, 3, OrderMode::Sequential, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_random_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut current = 0;
        for _ in 0..500 {
            let next = pick_next_index(current, 4, OrderMode::Random, &mut rng).unwrap();
            assert_ne!(next, current);
            assert!(next < 4);
            current = next;
        }
    }

    #[test]
    fn test_random_two_elements_alternates() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_next_index(0, 2, OrderMode::Random, &mut rng).unwrap(), 1);
        assert_eq!(pick_next_index(1, 2, OrderMode::Random, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_random_covers_all_others() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[pick_next_index(2, 5, OrderMode::Random, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, false, true, true]);
    }

    #[test]
    fn test_single_element_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        for mode in [OrderMode::Random, OrderMode::Sequential] {
            assert_eq!(pick_next_index(0, 1, mode, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_empty_list_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = pick_next_index(0, 0, OrderMode::Random, &mut rng);
        assert!(matches!(result, Err(PairsError::InvalidState(_))));
    }
}
