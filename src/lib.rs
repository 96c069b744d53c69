//! Strip-parallel distributed dense matrix multiplication.
//!
//! `strip-mul` computes `C = A × B` across a group of cooperating workers.
//! Both operands are partitioned into load-balanced strips: each worker owns
//! a band of A's rows and a band of B's columns, multiplies its row band
//! against every column band as the bands rotate through the group by
//! broadcast, and contributes its finished row strip of C to a variable-size
//! gather on the coordinator.
//!
//! The message-passing substrate lives in the `group-comm` crate; this crate
//! holds the data model, the partition planner, the pipeline itself and the
//! four-stage task lifecycle used by external harnesses.
//!
//! # Example
//!
//! ```no_run
//! use strip_mul::{Matrix, multiply};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), strip_mul::Error> {
//!     let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
//!     let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0])?;
//!
//!     let c = multiply(&a, &b, 4).await?;
//!     assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod matrix;
mod plan;
mod task;
mod validate;

pub use engine::{multiply, multiply_naive};
pub use error::Error;
pub use matrix::{Element, Matrix, MatrixView};
pub use plan::{PartitionPlan, Strip, split};
pub use task::{MatmulTask, Task, TaskData};
pub use validate::dims_valid;
