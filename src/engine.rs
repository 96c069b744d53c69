//! The strip-parallel multiplication pipeline.
//!
//! One run walks Validator → Planner → Distributor → local multiply with
//! rotation broadcasts → Gatherer. The coordinator (rank 0) doubles as a
//! regular worker: it ships every active worker its packed operand strips,
//! computes its own strip like everyone else, then reassembles the result
//! through a variable-size gather.

use futures_util::future::try_join_all;
use group_comm::{Group, GroupComm};
use tracing::debug;

use crate::Error;
use crate::matrix::{Element, Matrix, MatrixView};
use crate::plan::PartitionPlan;
use crate::validate;

const COORDINATOR: usize = 0;

/// Multiplies `a` by `b` across `workers` logical workers.
///
/// The result is identical for every worker count; `workers` only controls
/// how the operands are stripped. Requesting more workers than
/// `min(rows(A), cols(B))` leaves the surplus idle.
pub async fn multiply<E: Element>(
    a: &Matrix<E>,
    b: &Matrix<E>,
    workers: usize,
) -> Result<Matrix<E>, Error> {
    validate::check(a, b)?;
    if workers == 0 {
        return Err(Error::NoWorkers);
    }

    let (k, m) = (a.cols(), b.cols());
    let plan = PartitionPlan::new(a.rows(), m, workers);
    debug!(
        rows = a.rows(),
        inner = k,
        cols = m,
        workers,
        active = plan.np,
        "starting strip-parallel run"
    );

    let mut handles = Vec::with_capacity(plan.np);
    for comm in Group::new(plan.np) {
        let plan = plan.clone();
        // Only the coordinator holds the full operands.
        let operands = (comm.rank() == COORDINATOR).then(|| (a.clone(), b.clone()));
        handles.push(tokio::spawn(worker(comm, plan, k, m, operands)));
    }

    let mut outputs = Vec::with_capacity(plan.np);
    for joined in try_join_all(handles).await.map_err(|_| Error::WorkerPanicked)? {
        outputs.push(joined?);
    }
    outputs.into_iter().flatten().next().ok_or(Error::MissingResult)
}

/// Sequential reference product, used as the correctness baseline.
pub fn multiply_naive<E: Element>(a: &Matrix<E>, b: &Matrix<E>) -> Result<Matrix<E>, Error> {
    validate::check(a, b)?;
    let mut out = vec![E::ZERO; a.rows() * b.cols()];
    a.view().multiply_into(&b.view(), &mut out, b.cols(), 0);
    Matrix::from_vec(a.rows(), b.cols(), out)
}

/// One active worker's whole run. Returns the assembled result on the
/// coordinator and `None` everywhere else.
async fn worker<E: Element>(
    mut comm: GroupComm<E>,
    plan: PartitionPlan,
    k: usize,
    m: usize,
    operands: Option<(Matrix<E>, Matrix<E>)>,
) -> Result<Option<Matrix<E>>, Error> {
    let rank = comm.rank();

    if let Some((a, b)) = &operands {
        distribute(&mut comm, &plan, a, b).await?;
    }

    // One buffer per worker: the row strip of A followed by the packed
    // column strip of B, read back as two views over the same allocation.
    let buf = comm.recv(COORDINATOR).await?;
    let h_strip = plan.h[rank];
    let v_strip = plan.v[rank];
    let boundary = h_strip.len * k;
    let h = MatrixView::new(&buf[..boundary], h_strip.len, k);
    let own_v = MatrixView::new(&buf[boundary..], k, v_strip.len);

    comm.barrier().await;

    let mut res_strip = vec![E::ZERO; h_strip.len * m];
    h.multiply_into(&own_v, &mut res_strip, m, v_strip.offset);

    // Rotation: each active worker in turn makes its column strip visible to
    // the rest of the group. The owner already multiplied its strip above.
    for round in 0..plan.np {
        if round == rank {
            comm.broadcast(round, Some(buf[boundary..].to_vec())).await?;
        } else {
            let incoming = comm.broadcast(round, None).await?;
            let v = MatrixView::new(&incoming, k, plan.v[round].len);
            h.multiply_into(&v, &mut res_strip, m, plan.v[round].offset);
        }
        debug!(rank, round, "rotation round complete");
    }

    let gathered = comm.gather(COORDINATOR, res_strip).await?;
    match gathered {
        Some(parts) => assemble(parts, m).map(Some),
        None => Ok(None),
    }
}

/// Coordinator side of distribution: pack and ship each active worker's
/// strips, its own included, as a single contiguous buffer.
async fn distribute<E: Element>(
    comm: &mut GroupComm<E>,
    plan: &PartitionPlan,
    a: &Matrix<E>,
    b: &Matrix<E>,
) -> Result<(), Error> {
    let k = a.cols();
    for p in 0..plan.np {
        let mut buf = Vec::with_capacity(plan.h[p].len * k + k * plan.v[p].len);
        buf.extend_from_slice(a.row_band(plan.h[p]));
        b.pack_cols_into(plan.v[p], &mut buf);
        debug!(worker = p, len = buf.len(), "shipping operand strips");
        comm.send(p, buf).await?;
    }
    Ok(())
}

/// Concatenates the gathered row strips, already in rank order, into the
/// full result matrix.
fn assemble<E: Element>(parts: Vec<Vec<E>>, m: usize) -> Result<Matrix<E>, Error> {
    let mut data = Vec::with_capacity(parts.iter().map(Vec::len).sum());
    for part in parts {
        data.extend(part);
    }
    let rows = data.len() / m;
    Matrix::from_vec(rows, m, data)
}
