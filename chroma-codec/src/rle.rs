//! Row-wise run-length encoding
//!
//! Runs never cross row boundaries, matching the row-major reading order of
//! program images. Works over any copyable cell type so the same routines
//! serve raw pixels (RLE method) and palette indices (hybrid method).

use crate::error::{CompressionError, Result};

/// Encode a row-major buffer into runs, restarting at every row boundary.
pub fn encode_rows<T: Copy + Eq>(cells: &[T], width: usize) -> Vec<(T, u32)> {
    let mut runs = Vec::new();

    for row in cells.chunks(width.max(1)) {
        let mut iter = row.iter();
        let Some(&first) = iter.next() else { continue };
        let mut current = first;
        let mut count: u32 = 1;

        for &cell in iter {
            if cell == current {
                count += 1;
            } else {
                runs.push((current, count));
                current = cell;
                count = 1;
            }
        }
        runs.push((current, count));
    }

    runs
}

/// Expand runs back into cells, enforcing the declared total.
pub fn decode_runs<T: Copy>(runs: &[(T, u32)], expected: usize) -> Result<Vec<T>> {
    let mut cells = Vec::with_capacity(expected);

    for &(value, count) in runs {
        if count == 0 {
            return Err(CompressionError::ZeroLengthRun);
        }
        if cells.len() + count as usize > expected {
            return Err(CompressionError::RunLengthMismatch {
                expected,
                actual: cells.len() + count as usize,
            });
        }
        cells.extend(std::iter::repeat(value).take(count as usize));
    }

    if cells.len() != expected {
        return Err(CompressionError::RunLengthMismatch {
            expected,
            actual: cells.len(),
        });
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_restart_per_row() {
        // Two rows of the same value still produce two runs
        let cells = [7u32, 7, 7, 7];
        assert_eq!(encode_rows(&cells, 2), vec![(7, 2), (7, 2)]);
    }

    #[test]
    fn test_encode_mixed_row() {
        let cells = [1u32, 1, 2, 3, 3, 3];
        assert_eq!(encode_rows(&cells, 6), vec![(1, 2), (2, 1), (3, 3)]);
    }

    #[test]
    fn test_round_trip() {
        let cells = [5u32, 5, 1, 1, 1, 9, 2, 2, 2];
        let runs = encode_rows(&cells, 3);
        assert_eq!(decode_runs(&runs, cells.len()).unwrap(), cells.to_vec());
    }

    #[test]
    fn test_decode_rejects_zero_length_run() {
        let err = decode_runs(&[(1u32, 0)], 1).unwrap_err();
        assert!(matches!(err, CompressionError::ZeroLengthRun));
    }

    #[test]
    fn test_decode_rejects_short_and_long_totals() {
        assert!(matches!(
            decode_runs(&[(1u32, 2)], 3).unwrap_err(),
            CompressionError::RunLengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(matches!(
            decode_runs(&[(1u32, 4)], 3).unwrap_err(),
            CompressionError::RunLengthMismatch {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_high_entropy_degenerates_to_unit_runs() {
        let cells: Vec<u32> = (0..16).collect();
        let runs = encode_rows(&cells, 4);
        assert_eq!(runs.len(), 16);
        assert!(runs.iter().all(|&(_, count)| count == 1));
    }
}
