mod common;

use common::{chars, four_symbol_text};
use fastrand::Rng;
use keygraph::geometry::KeyboardGeometry;
use keygraph::graph::bisection::{bisect, BisectionOptions};
use keygraph::graph::ranking::{Metric, NodeRanking};
use keygraph::graph::WeightedGraph;
use keygraph::model::TextModel;
use keygraph::placement::{
    assemble_layout, place_hand, HandGrid, PlacementPlan, ScoringRule, Tier,
};
use nalgebra::DMatrix;

fn grid_rows(grid: &HandGrid) -> Vec<Vec<Option<usize>>> {
    (0..grid.rows())
        .map(|r| (0..grid.cols()).map(|c| grid.get(r, c)).collect())
        .collect()
}

#[test]
fn test_standard_plan_tiers() {
    let plan = PlacementPlan::standard();
    assert_eq!(plan.steps.len(), 6);

    let home = &plan.steps[0];
    assert_eq!(home.tier, Tier::Home);
    assert_eq!(home.slots, vec![(1, 3), (1, 2), (1, 1), (1, 0)]);

    let reach: Vec<_> = plan.steps[1..5].iter().map(|s| s.rule).collect();
    assert_eq!(
        reach,
        (0..4)
            .rev()
            .map(|column| ScoringRule::ColumnReach { column })
            .collect::<Vec<_>>()
    );

    let stretch = &plan.steps[5];
    assert_eq!(stretch.slots, vec![(1, 4), (0, 4), (2, 4)]);
    assert_eq!(stretch.rule, ScoringRule::StretchColumn { index_column: 3 });
}

#[test]
fn test_plan_rejects_two_row_grid() {
    assert!(PlacementPlan::for_grid(2, 5).is_err());
    assert!(PlacementPlan::for_grid(3, 1).is_err());
}

/// Nine nodes on a 3x3 hand with hand-picked links; see the expected grid below.
#[test]
fn test_scoring_rules_on_small_hand() {
    let mut p = DMatrix::<f64>::zeros(9, 9);
    p[(5, 1)] = 0.3; // 5 and 6 pull toward the little-finger home key
    p[(6, 1)] = 0.2;
    p[(2, 0)] = 0.1; // 2 is linked to the index home key
    p[(0, 7)] = 0.05;
    p[(8, 2)] = 0.2; // 8 pulls toward a placed key off the index column
    p[(3, 5)] = 0.1; // 3 is linked to the index column
    let g = WeightedGraph::from_probabilities(&p);

    let ranked: Vec<usize> = (0..9).collect();
    let plan = PlacementPlan::for_grid(3, 3).unwrap();
    let grid = place_hand(&g, &ranked, &plan);

    assert!(grid.is_full());
    assert_eq!(
        grid_rows(&grid),
        vec![
            vec![Some(2), Some(5), Some(4)],
            vec![Some(1), Some(0), Some(8)],
            vec![Some(7), Some(6), Some(3)],
        ]
    );
}

#[test]
fn test_ties_keep_ranked_order() {
    // No edges at all: every score ties
    let g = WeightedGraph::from_probabilities(&DMatrix::zeros(9, 9));
    let ranked = vec![8, 7, 6, 5, 4, 3, 2, 1, 0];
    let grid = place_hand(&g, &ranked, &PlacementPlan::for_grid(3, 3).unwrap());
    assert_eq!(
        grid_rows(&grid),
        vec![
            vec![Some(4), Some(6), Some(1)],
            vec![Some(7), Some(8), Some(2)],
            vec![Some(3), Some(5), Some(0)],
        ]
    );
}

#[test]
fn test_short_hand_leaves_slots_empty() {
    let g = WeightedGraph::from_probabilities(&DMatrix::zeros(2, 2));
    let grid = place_hand(&g, &[1, 0], &PlacementPlan::for_grid(3, 3).unwrap());
    assert_eq!(grid.get(1, 1), Some(1));
    assert_eq!(grid.get(1, 0), Some(0));
    assert_eq!(grid.placed().count(), 2);
    assert!(!grid.is_full());
}

#[test]
fn test_full_hand_places_every_node_once() {
    let n = 15;
    let mut p = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        p[(i, (i * 7 + 3) % n)] = 0.01 * (i + 1) as f64;
    }
    let g = WeightedGraph::from_probabilities(&p);
    let ranked = Metric::Degree.rank(&g, &(0..n).collect::<Vec<_>>());
    let grid = place_hand(&g, &ranked, &PlacementPlan::standard());

    assert!(grid.is_full());
    let mut placed: Vec<usize> = grid.placed().collect();
    placed.sort_unstable();
    assert_eq!(placed, (0..n).collect::<Vec<_>>());

    // Home tier: top four ranked nodes, index finger first
    assert_eq!(grid.get(1, 3), Some(ranked[0]));
    assert_eq!(grid.get(1, 2), Some(ranked[1]));
    assert_eq!(grid.get(1, 1), Some(ranked[2]));
    assert_eq!(grid.get(1, 0), Some(ranked[3]));
}

#[test]
fn test_assemble_mirrors_right_hand() {
    let geom = KeyboardGeometry::standard();
    let mut left = HandGrid::new(3, 5);
    let mut right = HandGrid::new(3, 5);
    for r in 0..3 {
        for c in 0..5 {
            left.set((r, c), r * 5 + c);
            right.set((r, c), 15 + r * 5 + c);
        }
    }

    let layout = assemble_layout(&geom, &left, &right).unwrap();
    assert_eq!(layout.len(), 30);
    assert_eq!(&layout[0..5], &[0, 1, 2, 3, 4]);
    // Right little finger sits on the outer edge, stretch column in the middle
    assert_eq!(&layout[5..10], &[19, 18, 17, 16, 15]);
    assert_eq!(layout[14], 9);
    assert_eq!(layout[15], 24);
    assert_eq!(layout[29], 25);
}

#[test]
fn test_assemble_reports_empty_slots() {
    let geom = KeyboardGeometry::standard();
    let left = HandGrid::new(3, 5);
    let right = HandGrid::new(3, 5);
    assert!(assemble_layout(&geom, &left, &right).is_err());
}

#[test]
fn test_higher_stationary_node_takes_index_home() {
    let model = TextModel::from_symbols(&chars(&four_symbol_text()), 1e-2).unwrap();
    let g = WeightedGraph::from_model(&model);
    let all: Vec<usize> = (0..g.node_count()).collect();
    let mut rng = Rng::with_seed(42);
    let split = bisect(&g, &Metric::Degree.rank(&g, &all), &BisectionOptions::default(), &mut rng)
        .unwrap();

    let plan = PlacementPlan::for_grid(3, 3).unwrap();
    for hand in [&split.left, &split.right] {
        assert_eq!(hand.len(), 2);
        let grid = place_hand(&g, &Metric::Degree.rank(&g, hand), &plan);
        let top = *hand
            .iter()
            .max_by(|&&a, &&b| model.stationary[a].total_cmp(&model.stationary[b]))
            .unwrap();
        assert_eq!(grid.get(1, 1), Some(top), "index home slot of hand {:?}", hand);
    }
}
