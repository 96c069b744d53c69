use std::env;

use rand::Rng;
use strip_mul::{Matrix, multiply};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let n: usize = args.get(1).unwrap_or(&"4".to_string()).parse()?;
    let k: usize = args.get(2).unwrap_or(&"4".to_string()).parse()?;
    let m: usize = args.get(3).unwrap_or(&"4".to_string()).parse()?;
    let workers: usize = args.get(4).unwrap_or(&"4".to_string()).parse()?;

    let mut rng = rand::thread_rng();
    let a = Matrix::from_vec(n, k, (0..n * k).map(|_| rng.gen_range(-9.0..9.0)).collect())?;
    let b = Matrix::from_vec(k, m, (0..k * m).map(|_| rng.gen_range(-9.0..9.0)).collect())?;

    println!("Multiplying {n}x{k} by {k}x{m} across {workers} workers");
    let c = multiply(&a, &b, workers).await?;

    if c.rows() * c.cols() <= 64 {
        println!("Result ({}x{}):", c.rows(), c.cols());
        for row in 0..c.rows() {
            let line: Vec<String> = (0..c.cols()).map(|col| format!("{:8.2}", c.get(row, col))).collect();
            println!("  {}", line.join(" "));
        }
    } else {
        println!("Result computed: {}x{}", c.rows(), c.cols());
    }

    Ok(())
}
