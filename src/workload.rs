//! Synthetic CPU kernels. They are deliberately naive: each exists to burn a
//! predictable amount of a particular kind of work, not to be fast.

use rand::Rng;

pub type Matrix = Vec<Vec<f64>>;

/// Naive doubly-recursive Fibonacci. No memoization.
pub fn fibonacci(n: u64) -> u64 {
  if n <= 1 {
    return n;
  }

  fibonacci(n - 1) + fibonacci(n - 2)
}

/// Trial division up to `floor(sqrt(n))`.
pub fn is_prime(n: u64) -> bool {
  if n < 2 {
    return false;
  }

  let limit = (n as f64).sqrt() as u64;
  (2..=limit).all(|i| n % i != 0)
}

/// Counts primes in `[2, limit)`.
pub fn count_primes(limit: u64) -> usize {
  (2..limit).filter(|&i| is_prime(i)).count()
}

/// An `n`x`n` matrix of uniform values in `[0, 1)`.
pub fn random_matrix<R: Rng>(rng: &mut R, n: usize) -> Matrix {
  (0..n).map(|_| (0..n).map(|_| rng.random::<f64>()).collect()).collect()
}

/// Textbook triple loop: `c[i][j] = sum_k a[i][k] * b[k][j]`.
pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Matrix {
  let n = a.len();

  (0..n)
    .map(|i| (0..n).map(|j| (0..n).map(|k| a[i][k] * b[k][j]).sum::<f64>()).collect())
    .collect()
}

/// Builds two random `n`x`n` matrices and multiplies them.
pub fn multiply_random<R: Rng>(rng: &mut R, n: usize) -> Matrix {
  let a = random_matrix(rng, n);
  let b = random_matrix(rng, n);

  matrix_multiply(&a, &b)
}

/// `len` uniform integers in `[1, 1000000]`.
pub fn random_values<R: Rng>(rng: &mut R, len: usize) -> Vec<i64> {
  (0..len).map(|_| rng.random_range(1..=1_000_000)).collect()
}

/// Out-of-place quicksort pivoting on the middle element by index. Every
/// level allocates fresh `less`, `equal` and `greater` vectors.
pub fn quicksort(values: &[i64]) -> Vec<i64> {
  if values.len() <= 1 {
    return values.to_vec();
  }

  let pivot = values[values.len() / 2];

  let less: Vec<i64> = values.iter().copied().filter(|&x| x < pivot).collect();
  let equal: Vec<i64> = values.iter().copied().filter(|&x| x == pivot).collect();
  let greater: Vec<i64> = values.iter().copied().filter(|&x| x > pivot).collect();

  let mut sorted = quicksort(&less);
  sorted.extend(equal);
  sorted.extend(quicksort(&greater));

  sorted
}

/// Accumulates `sin(a) * cos(b)` over `iterations` pairs of fresh uniform
/// values.
pub fn float_ops<R: Rng>(rng: &mut R, iterations: u64) -> f64 {
  let mut acc = 0.0;
  for _ in 0..iterations {
    acc += rng.random::<f64>().sin() * rng.random::<f64>().cos();
  }

  acc
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  fn fibonacci_iter(n: u64) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
      (a, b) = (b, a + b);
    }
    a
  }

  #[test]
  fn fibonacci_known_values() {
    assert_eq!(fibonacci(0), 0);
    assert_eq!(fibonacci(1), 1);
    assert_eq!(fibonacci(10), 55);

    for n in 0..25 {
      assert_eq!(fibonacci(n), fibonacci_iter(n), "fibonacci({n})");
    }
  }

  #[test]
  fn primality() {
    assert!(!is_prime(0));
    assert!(!is_prime(1));
    assert!(is_prime(2));
    assert!(is_prime(3));
    assert!(!is_prime(4));
    assert!(!is_prime(25));
    assert!(is_prime(7919));
  }

  #[test]
  fn counts_primes_below_thirty() {
    assert_eq!(count_primes(30), 10);
    assert_eq!(count_primes(2), 0);
    assert_eq!(count_primes(10_000), 1229);
  }

  #[test]
  fn identity_product_is_the_other_operand() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 6;

    let identity: Matrix = (0..n)
      .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
      .collect();
    let m = random_matrix(&mut rng, n);

    for product in [matrix_multiply(&identity, &m), matrix_multiply(&m, &identity)] {
      for (row, expected) in product.iter().zip(&m) {
        for (x, y) in row.iter().zip(expected) {
          assert!((x - y).abs() < 1e-12, "{x} != {y}");
        }
      }
    }
  }

  #[test]
  fn random_matrix_shape_and_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let m = random_matrix(&mut rng, 4);

    assert_eq!(m.len(), 4);
    assert!(m.iter().all(|row| row.len() == 4));
    assert!(m.iter().flatten().all(|x| (0.0..1.0).contains(x)));
    assert_eq!(multiply_random(&mut rng, 3).len(), 3);
  }

  #[test]
  fn quicksort_sorts_a_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    let values = random_values(&mut rng, 2_000);
    assert!(values.iter().all(|v| (1..=1_000_000).contains(v)));

    let sorted = quicksort(&values);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    let mut expected = values.clone();
    expected.sort_unstable();
    assert_eq!(sorted, expected);
  }

  #[test]
  fn quicksort_is_idempotent() {
    let values = vec![5, 3, 3, 9, 1, 1, 1, 8];
    let once = quicksort(&values);
    assert_eq!(quicksort(&once), once);
  }

  #[test]
  fn quicksort_trivial_inputs() {
    assert_eq!(quicksort(&[]), Vec::<i64>::new());
    assert_eq!(quicksort(&[4]), vec![4]);
    assert_eq!(quicksort(&[1, 2, 3]), vec![1, 2, 3]);
  }

  #[test]
  fn float_ops_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(float_ops(&mut rng, 0), 0.0);

    // each term lies in [0, sin(1)]
    let acc = float_ops(&mut rng, 1_000);
    assert!(acc > 0.0 && acc < 1_000.0);
  }
}
