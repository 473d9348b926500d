use crate::model::BinEdges;

/// Fixed-edge histogram. Bins are `[e_i, e_{i+1})` except the last, which
/// also includes its upper edge. Out-of-range and NaN values are dropped.
pub fn histogram(values: &[f64], edges: &BinEdges) -> Vec<u64> {
    let edges = edges.as_slice();
    let n_bins = edges.len().saturating_sub(1);
    let mut counts = vec![0u64; n_bins];
    if n_bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[n_bins];

    for &v in values {
        if !(v >= lo && v <= hi) {
            continue;
        }
        let bin = if v == hi {
            n_bins - 1
        } else {
            // First edge strictly greater than v closes the bin.
            edges.partition_point(|&e| e <= v) - 1
        };
        counts[bin] += 1;
    }

    counts
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_histogram.rs"]
mod tests;
