use strip_mul::{Element, MatmulTask, Task, TaskData};

fn two_by_two() -> TaskData<i64> {
    TaskData::new(vec![1, 2, 3, 4], vec![5, 6, 7, 8], [2, 2, 2, 2], 4)
}

async fn drive<E: Element>(mut task: MatmulTask<E>) -> Option<TaskData<E>> {
    if !task.validate() {
        return None;
    }
    assert!(task.prepare().await);
    assert!(task.run().await);
    assert!(task.finalize().await);
    Some(task.into_data())
}

#[tokio::test]
async fn full_lifecycle_writes_output_buffers() {
    let task = MatmulTask::new(two_by_two(), 2);
    let data = drive(task).await.unwrap();

    assert_eq!(data.c, vec![19, 22, 43, 50]);
    assert_eq!(data.c_rows, [2]);
    assert_eq!(data.c_cols, [2]);
}

#[tokio::test]
async fn validate_rejects_inner_dimension_mismatch() {
    // A is 1x3, B is 2x1.
    let data = TaskData::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0], [1, 3, 2, 1], 1);
    let task = MatmulTask::new(data, 4);
    assert!(!task.validate());
}

#[tokio::test]
async fn validate_rejects_short_input_buffer() {
    // Dims claim 2x2 operands but A only holds three elements.
    let data = TaskData::new(vec![1, 2, 3], vec![5, 6, 7, 8], [2, 2, 2, 2], 4);
    let task = MatmulTask::new(data, 2);
    assert!(!task.validate());
}

#[tokio::test]
async fn validate_rejects_undersized_output_capacity() {
    let data = TaskData::new(vec![1, 2, 3, 4], vec![5, 6, 7, 8], [2, 2, 2, 2], 3);
    let task = MatmulTask::new(data, 2);
    assert!(!task.validate());
}

#[tokio::test]
async fn validate_rejects_zero_workers() {
    let task = MatmulTask::new(two_by_two(), 0);
    assert!(!task.validate());
}

#[tokio::test]
async fn rerunnable_from_fresh_instances() {
    // A measurement harness re-runs the lifecycle with a fresh task each
    // time; every pass must produce the same output.
    for _ in 0..3 {
        let data = drive(MatmulTask::new(two_by_two(), 3)).await.unwrap();
        assert_eq!(data.c, vec![19, 22, 43, 50]);
    }
}

#[tokio::test]
async fn oversized_output_capacity_is_accepted() {
    let data = TaskData::new(vec![1, 2, 3, 4], vec![5, 6, 7, 8], [2, 2, 2, 2], 16);
    let data = drive(MatmulTask::new(data, 2)).await.unwrap();

    // The result occupies the front of the buffer; the slack stays zeroed.
    assert_eq!(&data.c[..4], &[19, 22, 43, 50]);
    assert!(data.c[4..].iter().all(|&e| e == 0));
    assert_eq!(data.c_rows, [2]);
    assert_eq!(data.c_cols, [2]);
}
