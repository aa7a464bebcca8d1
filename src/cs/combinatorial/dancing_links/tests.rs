use std::collections::BTreeSet;
use std::ops::ControlFlow;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cs::combinatorial::backtracking::brute_force_exact_covers;
use crate::cs::combinatorial::dancing_links::{render_solutions, Matrix, SearchConfig, Solution};

fn build(column_count: usize, rows: &[Vec<usize>]) -> Matrix {
    let mut matrix = Matrix::new(column_count).unwrap();
    matrix.add_rows(rows).unwrap();
    matrix
}

fn sizes(matrix: &Matrix) -> Vec<usize> {
    (0..matrix.column_count())
        .map(|c| matrix.column_size(c).unwrap())
        .collect()
}

fn ingested_sizes(column_count: usize, rows: &[Vec<usize>]) -> Vec<usize> {
    let mut counts = vec![0; column_count];
    for &c in rows.iter().flatten() {
        counts[c] += 1;
    }
    counts
}

fn row_sets(solutions: &[Solution]) -> BTreeSet<Vec<usize>> {
    solutions.iter().map(Solution::sorted_row_ids).collect()
}

fn seven_by_eight() -> Vec<Vec<usize>> {
    vec![
        vec![2, 4, 5],
        vec![0, 3, 6],
        vec![1, 2, 5],
        vec![4],
        vec![0, 3],
        vec![1, 6],
        vec![3, 4, 6],
        vec![2, 5],
    ]
}

#[test]
fn test_seven_by_eight_fixture() {
    let rows = seven_by_eight();
    let mut matrix = build(7, &rows);
    let solutions: Vec<Solution> = matrix.solutions().collect();

    let expected = BTreeSet::from([vec![0, 4, 5], vec![1, 2, 3], vec![3, 4, 5, 7]]);
    assert_eq!(row_sets(&solutions), expected);

    // The four-row cover {0,3} {1,6} {2,5} {4} is among them.
    let four_rows = solutions.iter().find(|s| s.len() == 4).unwrap();
    let mut rows_of_four = four_rows.rows().to_vec();
    rows_of_four.sort();
    assert_eq!(rows_of_four, vec![vec![0, 3], vec![1, 6], vec![2, 5], vec![4]]);

    for solution in &solutions {
        assert!(solution.is_exact_cover(7), "not an exact cover:\n{}", solution);
    }
    assert_eq!(matrix.check_links(), Ok(()));
    assert_eq!(sizes(&matrix), ingested_sizes(7, &rows));
}

#[test]
fn test_trivial_cover_is_found() {
    for n in 1..=6 {
        let mut rows: Vec<Vec<usize>> = (0..n).map(|c| vec![c]).collect();
        // Noise rows that overlap each other and the singletons.
        if n > 1 {
            rows.push((0..n).collect());
            rows.push(vec![0, n - 1]);
        }
        let mut matrix = build(n, &rows);
        let found = row_sets(&matrix.solve_all());
        let trivial: Vec<usize> = (0..n).collect();
        assert!(found.contains(&trivial), "n = {}", n);
    }
}

#[test]
fn test_missing_column_yields_no_solutions() {
    let rows = vec![vec![0, 1], vec![1, 3], vec![0], vec![3]];
    let mut matrix = build(4, &rows);
    assert_eq!(matrix.column_size(2), Some(0));
    assert_eq!(matrix.solutions().count(), 0);
    assert_eq!(matrix.count_solutions(), 0);
    assert_eq!(matrix.check_links(), Ok(()));
}

#[test]
fn test_searches_leave_matrix_reusable() {
    let rows = seven_by_eight();
    let mut matrix = build(7, &rows);
    let expected = ingested_sizes(7, &rows);

    // Abandon the iterator after one solution, then stop the recursion early.
    assert!(matrix.solutions().next().is_some());
    assert_eq!(sizes(&matrix), expected);
    matrix.for_each_solution(|_| ControlFlow::Break(()));
    assert_eq!(sizes(&matrix), expected);
    assert_eq!(
        matrix.active_columns().collect::<Vec<_>>(),
        (0..7).collect::<Vec<_>>()
    );

    // A full run afterwards still sees every solution.
    assert_eq!(matrix.count_solutions(), 3);
    assert_eq!(matrix.solutions_with(SearchConfig::default()).count(), 3);
    assert_eq!(matrix.check_links(), Ok(()));
}

#[test]
fn test_rows_added_between_searches() {
    let mut matrix = Matrix::new(3).unwrap();
    matrix.add_rows([vec![0, 1]]).unwrap();
    assert_eq!(matrix.count_solutions(), 0);

    matrix.add_row(&[2]).unwrap();
    assert_eq!(row_sets(&matrix.solve_all()), BTreeSet::from([vec![0, 1]]));

    matrix.add_rows([vec![0], vec![1, 2]]).unwrap();
    assert_eq!(
        row_sets(&matrix.solve_all()),
        BTreeSet::from([vec![0, 1], vec![2, 3]])
    );
}

#[test]
fn test_double_ingestion_doubles_solutions() {
    let rows = vec![vec![0, 1], vec![2], vec![0], vec![1, 2]];
    let mut matrix = build(3, &rows);
    assert_eq!(matrix.count_solutions(), 2);

    matrix.add_rows(&rows).unwrap();
    let doubled: Vec<usize> = ingested_sizes(3, &rows).iter().map(|s| s * 2).collect();
    assert_eq!(sizes(&matrix), doubled);
    // Each cover now exists once per choice of copy for each of its rows.
    assert_eq!(matrix.count_solutions(), 8);
}

#[test]
fn test_matches_brute_force_on_random_instances() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x00d1_5c0e);
    for round in 0..200 {
        let column_count = rng.gen_range(1..=8);
        let row_count = rng.gen_range(0..=10);
        let mut rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            let row: Vec<usize> = (0..column_count)
                .filter(|_| rng.gen_bool(0.35))
                .collect();
            rows.push(row);
        }

        let mut matrix = build(column_count, &rows);
        let solutions = matrix.solve_all();
        let expected: BTreeSet<Vec<usize>> =
            brute_force_exact_covers(column_count, &rows).into_iter().collect();

        assert_eq!(
            solutions.len(),
            expected.len(),
            "round {}: {} columns, rows {:?}",
            round,
            column_count,
            rows
        );
        assert_eq!(row_sets(&solutions), expected, "round {}", round);
        for solution in &solutions {
            assert!(solution.is_exact_cover(column_count));
        }

        let lazy: Vec<Solution> = matrix.solutions().collect();
        assert_eq!(lazy, solutions, "round {}", round);
        assert_eq!(sizes(&matrix), ingested_sizes(column_count, &rows));
        assert_eq!(matrix.check_links(), Ok(()));
    }
}

#[test]
fn test_render_matches_solution_order() {
    let mut matrix = build(2, &[vec![0, 1], vec![0], vec![1]]);
    let solutions = matrix.solve_all();
    assert_eq!(render_solutions(&solutions), "0, 1\n---\n0\n1");
}
