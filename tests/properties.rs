use strip_mul::{Element, Matrix, multiply, multiply_naive};

fn filled<E: Element>(rows: usize, cols: usize, f: impl Fn(usize) -> E) -> Matrix<E> {
    Matrix::from_vec(rows, cols, (0..rows * cols).map(f).collect()).unwrap()
}

fn assert_close(expected: &Matrix<f64>, actual: &Matrix<f64>, name: &str) {
    assert_eq!(expected.rows(), actual.rows(), "{name}: row count");
    assert_eq!(expected.cols(), actual.cols(), "{name}: col count");
    for (i, (e, a)) in expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .enumerate()
    {
        assert!(
            (e - a).abs() < 1e-9,
            "{name}: mismatch at index {i}: expected {e}, got {a}"
        );
    }
}

#[tokio::test]
async fn matches_sequential_reference() {
    let shapes = [
        (1, 1, 1),
        (2, 2, 2),
        (3, 5, 7),
        (13, 4, 9),
        (8, 8, 8),
        (5, 2, 11),
        (1, 7, 1),
    ];
    for (n, k, m) in shapes {
        let a = filled(n, k, |i| ((i % 10) as f64) - 3.0);
        let b = filled(k, m, |i| ((i % 7) as f64) + 0.5);
        let expected = multiply_naive(&a, &b).unwrap();
        for workers in [1, 2, 3, 8] {
            let c = multiply(&a, &b, workers).await.unwrap();
            assert_close(&expected, &c, &format!("{n}x{k}x{m} workers={workers}"));
        }
    }
}

#[tokio::test]
async fn result_invariant_under_worker_count() {
    let a = filled(9, 6, |i| (i as f64) * 0.25);
    let b = filled(6, 9, |i| (i as f64) - 20.0);

    let single = multiply(&a, &b, 1).await.unwrap();
    let eight = multiply(&a, &b, 8).await.unwrap();
    assert_eq!(single, eight);
}

#[tokio::test]
async fn oversubscribed_workers_contribute_nothing() {
    // np = min(2, 2, 16) = 2; the other 14 workers never join the group.
    let a = filled(2, 3, |i| i as i64);
    let b = filled(3, 2, |i| (i as i64) + 1);

    let expected = multiply_naive(&a, &b).unwrap();
    let c = multiply(&a, &b, 16).await.unwrap();
    assert_eq!(expected, c);
}

#[tokio::test]
async fn identity_leaves_operand_unchanged() {
    let b = Matrix::from_vec(2, 2, vec![2.0, 3.0, 4.0, 5.0]).unwrap();
    let id = Matrix::<f64>::identity(2);

    let c = multiply(&id, &b, 2).await.unwrap();
    assert_eq!(c, b);

    let c = multiply(&b, &id, 2).await.unwrap();
    assert_eq!(c, b);
}

#[tokio::test]
async fn zero_matrix_yields_zero_result() {
    let a = filled(3, 4, |i| (i as i64) + 1);
    let zero = Matrix::<i64>::zeros(4, 2);

    let c = multiply(&a, &zero, 3).await.unwrap();
    assert_eq!(c.rows(), 3);
    assert_eq!(c.cols(), 2);
    assert!(c.as_slice().iter().all(|&e| e == 0));
}

#[tokio::test]
async fn concrete_2x2_product() {
    let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();

    let c = multiply(&a, &b, 2).await.unwrap();
    assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
}

#[tokio::test]
async fn column_times_scalar_like_operand() {
    // A 1x3 against a 1x1 B is ill-shaped (cols(A)=3, rows(B)=1)...
    let wide = Matrix::from_vec(1, 3, vec![1, 2, 3]).unwrap();
    let one = Matrix::from_vec(1, 1, vec![4]).unwrap();
    assert!(multiply(&wide, &one, 2).await.is_err());

    // ...but a 3x1 against the same B multiplies fine.
    let tall = Matrix::from_vec(3, 1, vec![1, 2, 3]).unwrap();
    let c = multiply(&tall, &one, 2).await.unwrap();
    assert_eq!(c.as_slice(), &[4, 8, 12]);
}

#[tokio::test]
async fn shape_mismatch_fails_for_every_worker_count() {
    let a = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    let b = Matrix::from_vec(2, 1, vec![4.0, 5.0]).unwrap();

    for workers in 1..=8 {
        assert!(
            multiply(&a, &b, workers).await.is_err(),
            "workers={workers}"
        );
    }
}

#[tokio::test]
async fn uneven_strips_cover_whole_result() {
    // 10 rows over 3 workers gives a 4/3/3 row split and 7 columns over 3
    // gives 3/2/2, so every worker sees uneven strips on both sides.
    let a = filled(10, 5, |i| ((i * 7) % 23) as i64);
    let b = filled(5, 7, |i| ((i * 11) % 19) as i64);

    let expected = multiply_naive(&a, &b).unwrap();
    let c = multiply(&a, &b, 3).await.unwrap();
    assert_eq!(expected, c);
}
