//! The four-stage task lifecycle presented to the surrounding harness.
//!
//! A harness drives each task instance through `validate`, `prepare`, `run`
//! and `finalize`, in that order, exactly once each; `run` must not be
//! invoked after a failed `validate`. A `false` return from `validate` is
//! the intended failure signal; anything failing later is unrecoverable for
//! that invocation and is logged before being reported as `false`.

use async_trait::async_trait;
use tracing::error;

use crate::engine;
use crate::matrix::{Element, Matrix};
use crate::validate::dims_valid;

/// Lifecycle contract between a task and the invoking harness.
#[async_trait]
pub trait Task {
    fn validate(&self) -> bool;
    async fn prepare(&mut self) -> bool;
    async fn run(&mut self) -> bool;
    async fn finalize(&mut self) -> bool;
}

/// The buffer bundle a harness hands to one task invocation.
///
/// Inputs are the flattened operands plus their four dimension counts
/// `[rows(A), cols(A), rows(B), cols(B)]`. Outputs are a flattened result
/// buffer of harness-declared capacity and two cells reporting the result
/// shape.
#[derive(Debug, Clone)]
pub struct TaskData<E> {
    pub a: Vec<E>,
    pub b: Vec<E>,
    pub dims: [u64; 4],
    pub c: Vec<E>,
    pub c_rows: [u64; 1],
    pub c_cols: [u64; 1],
}

impl<E: Element> TaskData<E> {
    /// Bundles operand buffers with an output buffer of `capacity` elements.
    pub fn new(a: Vec<E>, b: Vec<E>, dims: [u64; 4], capacity: usize) -> Self {
        Self {
            a,
            b,
            dims,
            c: vec![E::ZERO; capacity],
            c_rows: [0],
            c_cols: [0],
        }
    }
}

/// Strip-parallel matrix multiplication behind the [`Task`] contract.
///
/// Each instance serves one invocation; a measurement harness that re-runs
/// the lifecycle does so from a fresh instance each time.
pub struct MatmulTask<E> {
    data: TaskData<E>,
    workers: usize,
    operands: Option<(Matrix<E>, Matrix<E>)>,
    result: Option<Matrix<E>>,
}

impl<E: Element> MatmulTask<E> {
    pub fn new(data: TaskData<E>, workers: usize) -> Self {
        Self {
            data,
            workers,
            operands: None,
            result: None,
        }
    }

    /// The harness's view of the buffers after `finalize`.
    pub fn data(&self) -> &TaskData<E> {
        &self.data
    }

    pub fn into_data(self) -> TaskData<E> {
        self.data
    }

    fn shape(&self) -> Option<(usize, usize, usize, usize)> {
        let [n, k, k2, m] = self.data.dims;
        Some((
            usize::try_from(n).ok()?,
            usize::try_from(k).ok()?,
            usize::try_from(k2).ok()?,
            usize::try_from(m).ok()?,
        ))
    }
}

#[async_trait]
impl<E: Element> Task for MatmulTask<E> {
    /// Pure shape check: dimension counts, buffer lengths against the
    /// declared dimensions, and output capacity. No side effects.
    fn validate(&self) -> bool {
        let Some((n, k, k2, m)) = self.shape() else {
            return false;
        };
        if !dims_valid(n, k, k2, m) {
            return false;
        }
        if self.workers == 0 {
            return false;
        }
        self.data.a.len() == n * k && self.data.b.len() == k * m && self.data.c.len() >= n * m
    }

    /// Materializes the operand matrices from the raw input buffers.
    async fn prepare(&mut self) -> bool {
        let Some((n, k, _, m)) = self.shape() else {
            return false;
        };
        let a = Matrix::from_vec(n, k, self.data.a.clone());
        let b = Matrix::from_vec(k, m, self.data.b.clone());
        match (a, b) {
            (Ok(a), Ok(b)) => {
                self.operands = Some((a, b));
                true
            }
            _ => false,
        }
    }

    /// Drives the distributed pipeline. Assumes a successful `validate`.
    async fn run(&mut self) -> bool {
        let Some((a, b)) = self.operands.as_ref() else {
            return false;
        };
        match engine::multiply(a, b, self.workers).await {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(e) => {
                error!(error = %e, "strip-parallel run failed");
                false
            }
        }
    }

    /// Writes the flattened result and its shape into the output buffers.
    async fn finalize(&mut self) -> bool {
        let Some(result) = self.result.take() else {
            return false;
        };
        let (rows, cols) = (result.rows(), result.cols());
        self.data.c[..rows * cols].copy_from_slice(result.as_slice());
        self.data.c_rows[0] = rows as u64;
        self.data.c_cols[0] = cols as u64;
        true
    }
}
