//! Rank-addressed message passing for lock-step worker groups.
//!
//! `group-comm` provides the coordination substrate for strip-parallel
//! computations: a fixed-size group of workers, each holding one
//! [`GroupComm`] handle, exchanging data through point-to-point sends and
//! collective operations (broadcast, variable-size gather, barrier).
//!
//! # Model
//!
//! A group is created once with [`Group::new`], which returns one handle per
//! rank. Handles are moved into their worker tasks and cannot be shared, so
//! only members of the group can take part in its collectives. Every
//! collective blocks its caller until the matching calls on the other ranks
//! have been made; there is no non-blocking path.
//!
//! # Example
//!
//! ```no_run
//! use group_comm::Group;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), group_comm::Error> {
//!     let mut comms = Group::new::<f64>(2);
//!     let mut b = comms.pop().unwrap();
//!     let mut a = comms.pop().unwrap();
//!
//!     let sender = tokio::spawn(async move { a.send(1, vec![1.0, 2.0]).await });
//!     let payload = b.recv(0).await?;
//!     assert_eq!(payload, vec![1.0, 2.0]);
//!
//!     sender.await.unwrap()?;
//!     Ok(())
//! }
//! ```

mod error;
mod group;

pub use error::Error;
pub use group::{Group, GroupComm};
