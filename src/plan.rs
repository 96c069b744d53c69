//! Strip partitioning of the operand matrices across workers.

/// A contiguous row range (of A) or column range (of B) owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strip {
    pub offset: usize,
    pub len: usize,
}

/// Splits an extent of `n` units into `p` strips whose sizes differ by at
/// most one, larger strips first. Offsets are the exclusive prefix sum of
/// the sizes, so the strips tile `0..n` exactly.
pub fn split(n: usize, p: usize) -> Vec<Strip> {
    let base = n / p;
    let remainder = n % p;
    let mut strips = Vec::with_capacity(p);
    let mut offset = 0;
    for i in 0..p {
        let len = base + usize::from(i < remainder);
        strips.push(Strip { offset, len });
        offset += len;
    }
    strips
}

/// The per-run partitioning of both operands.
///
/// `h[si]` is worker `si`'s row strip of A and `v[si]` its column strip of
/// B. Only `np = min(rows(A), cols(B), workers)` workers can hold at least
/// one row and one column, so the plan covers exactly that many; ranks past
/// `np` would hold empty strips and are excluded from the group entirely.
#[derive(Debug, Clone)]
pub struct PartitionPlan {
    pub h: Vec<Strip>,
    pub v: Vec<Strip>,
    pub np: usize,
}

impl PartitionPlan {
    pub fn new(rows_a: usize, cols_b: usize, workers: usize) -> Self {
        let np = rows_a.min(cols_b).min(workers);
        Self {
            h: split(rows_a, np),
            v: split(cols_b, np),
            np,
        }
    }
}
