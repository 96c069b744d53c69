//! Worker group construction and collective operations.

use std::sync::Arc;

use tokio::sync::{Barrier, mpsc};

use crate::Error;

/// Depth of each rank-pair channel. The deepest sequence a pair ever sees is
/// an unconsumed distribution buffer followed by a round-zero broadcast, so a
/// small constant keeps every send from blocking indefinitely while still
/// bounding memory.
const CHANNEL_DEPTH: usize = 4;

/// Factory for a fixed-size worker group.
pub struct Group;

impl Group {
    /// Builds a group of `size` workers and returns one communicator handle
    /// per rank, in rank order.
    ///
    /// The handles share a full mesh of bounded channels (one per ordered
    /// rank pair, self-pairs included) and a single barrier. Each handle
    /// must be moved into exactly one worker task.
    pub fn new<T: Send + 'static>(size: usize) -> Vec<GroupComm<T>> {
        let mut senders_by_src: Vec<Vec<mpsc::Sender<Vec<T>>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        let mut receivers_by_dst: Vec<Vec<mpsc::Receiver<Vec<T>>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();

        for src in 0..size {
            for dst in 0..size {
                let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
                senders_by_src[src].push(tx);
                receivers_by_dst[dst].push(rx);
            }
        }

        let barrier = Arc::new(Barrier::new(size));

        senders_by_src
            .into_iter()
            .zip(receivers_by_dst)
            .enumerate()
            .map(|(rank, (senders, receivers))| GroupComm {
                rank,
                size,
                senders,
                receivers,
                barrier: Arc::clone(&barrier),
            })
            .collect()
    }
}

/// One rank's endpoint into a worker group.
///
/// Point-to-point operations address peers by rank. Collective operations
/// must be invoked by every member of the group in matching order; a member
/// that skips a collective leaves the others blocked forever, which is why
/// workers outside a computation's active set must never receive a handle.
pub struct GroupComm<T> {
    rank: usize,
    size: usize,
    senders: Vec<mpsc::Sender<Vec<T>>>,
    receivers: Vec<mpsc::Receiver<Vec<T>>>,
    barrier: Arc<Barrier>,
}

impl<T: Send + 'static> GroupComm<T> {
    /// This handle's rank within the group.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of ranks in the group.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sends a buffer to `to`. Sending to one's own rank is allowed and is
    /// paired with a later `recv` from self.
    pub async fn send(&mut self, to: usize, payload: Vec<T>) -> Result<(), Error> {
        self.check_rank(to)?;
        self.senders[to]
            .send(payload)
            .await
            .map_err(|_| Error::PeerClosed(to))
    }

    /// Receives the next buffer sent by `from`, blocking until one arrives.
    pub async fn recv(&mut self, from: usize) -> Result<Vec<T>, Error> {
        self.check_rank(from)?;
        self.receivers[from]
            .recv()
            .await
            .ok_or(Error::PeerClosed(from))
    }

    /// Collective broadcast rooted at `root`.
    ///
    /// The root passes `Some(payload)` and every member, root included, gets
    /// the payload back. Non-roots pass `None`.
    pub async fn broadcast(&mut self, root: usize, payload: Option<Vec<T>>) -> Result<Vec<T>, Error>
    where
        T: Clone,
    {
        self.check_rank(root)?;
        if self.rank == root {
            let payload = payload.ok_or(Error::RootWithoutPayload)?;
            for dst in 0..self.size {
                if dst != self.rank {
                    self.send(dst, payload.clone()).await?;
                }
            }
            Ok(payload)
        } else {
            self.recv(root).await
        }
    }

    /// Collective variable-size gather rooted at `root`.
    ///
    /// Every member contributes `local`; the root returns all contributions
    /// in rank order, other members return `None`. Contributions may have
    /// different lengths.
    pub async fn gather(
        &mut self,
        root: usize,
        mut local: Vec<T>,
    ) -> Result<Option<Vec<Vec<T>>>, Error> {
        self.check_rank(root)?;
        if self.rank == root {
            let mut parts = Vec::with_capacity(self.size);
            for src in 0..self.size {
                if src == root {
                    parts.push(std::mem::take(&mut local));
                } else {
                    parts.push(self.recv(src).await?);
                }
            }
            Ok(Some(parts))
        } else {
            self.send(root, local).await?;
            Ok(None)
        }
    }

    /// Blocks until every member of the group has reached the barrier.
    pub async fn barrier(&self) {
        self.barrier.wait().await;
    }

    fn check_rank(&self, rank: usize) -> Result<(), Error> {
        if rank < self.size {
            Ok(())
        } else {
            Err(Error::RankOutOfBounds {
                rank,
                size: self.size,
            })
        }
    }
}
