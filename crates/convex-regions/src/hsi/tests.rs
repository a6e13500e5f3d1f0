use super::util::{dedup_points_in_place, for_each_combination};
use super::*;
use approx::assert_relative_eq;
use nalgebra::dvector;

fn unit_square() -> Vec<Hs> {
    vec![
        Hs::from_slice(&[1.0, 0.0], 1.0),
        Hs::from_slice(&[-1.0, 0.0], 0.0),
        Hs::from_slice(&[0.0, 1.0], 1.0),
        Hs::from_slice(&[0.0, -1.0], 0.0),
    ]
}

fn cube(half: f64) -> Vec<Hs> {
    let mut hs = Vec::new();
    for i in 0..3 {
        let mut n = [0.0; 3];
        n[i] = 1.0;
        hs.push(Hs::from_slice(&n, half));
        n[i] = -1.0;
        hs.push(Hs::from_slice(&n, half));
    }
    hs
}

#[test]
fn combinations_are_lexicographic_and_complete() {
    let mut seen = Vec::new();
    for_each_combination(5, 3, |c| seen.push(c.to_vec()));
    assert_eq!(seen.len(), 10);
    assert_eq!(seen.first(), Some(&vec![0, 1, 2]));
    assert_eq!(seen.last(), Some(&vec![2, 3, 4]));

    let mut none = 0;
    for_each_combination(2, 3, |_| none += 1);
    for_each_combination(3, 0, |_| none += 1);
    assert_eq!(none, 0);
}

#[test]
fn dedup_merges_close_points() {
    let mut pts = vec![
        dvector![1.0, 0.0],
        dvector![0.0, 0.0],
        dvector![1.0 + 1e-12, 0.0],
    ];
    dedup_points_in_place(&mut pts, 1e-9);
    assert_eq!(pts.len(), 2);
}

#[test]
fn unit_square_centre_and_vertices() {
    let hsi = halfspace_intersection(2, &unit_square(), &HsiCfg::default()).unwrap();
    assert_relative_eq!(hsi.interior_point()[0], 0.5, epsilon = 1e-9);
    assert_relative_eq!(hsi.interior_point()[1], 0.5, epsilon = 1e-9);
    assert_relative_eq!(hsi.chebyshev_radius(), 0.5, epsilon = 1e-9);
    assert_eq!(hsi.vertices().len(), 4);
    // counter-clockwise: positive signed area
    let v = hsi.vertices();
    let area: f64 = (0..v.len())
        .map(|k| {
            let (p, q) = (&v[k], &v[(k + 1) % v.len()]);
            p[0] * q[1] - p[1] * q[0]
        })
        .sum::<f64>()
        / 2.0;
    assert_relative_eq!(area, 1.0, epsilon = 1e-9);
    assert_eq!(hsi.facets().len(), 4);
    assert!(hsi
        .facets()
        .iter()
        .all(|f| matches!(f.source, FacetSource::Constraint(_)) && f.vertices.len() == 2));
}

#[test]
fn cube_has_eight_vertices_and_six_facets() {
    let hsi = halfspace_intersection(3, &cube(1.0), &HsiCfg::default()).unwrap();
    assert_eq!(hsi.vertices().len(), 8);
    assert_eq!(hsi.facets().len(), 6);
    assert!(hsi.facets().iter().all(|f| f.vertices.len() == 4));
    assert!(hsi.interior_point().norm() < 1e-9);
    assert_relative_eq!(hsi.chebyshev_radius(), 1.0, epsilon = 1e-9);
}

#[test]
fn contradiction_is_infeasible() {
    // x <= 0 and x >= 1
    let hs = vec![
        Hs::from_slice(&[1.0, 0.0], 0.0),
        Hs::from_slice(&[-1.0, 0.0], -1.0),
    ];
    assert_eq!(
        halfspace_intersection(2, &hs, &HsiCfg::default()),
        Err(HsiError::Infeasible)
    );
}

#[test]
fn touching_constraints_are_feasible_and_flat() {
    // y <= 0 and y >= 0 in 3D: the plane y = 0
    let hs = vec![
        Hs::from_slice(&[0.0, 1.0, 0.0], 0.0),
        Hs::from_slice(&[0.0, -1.0, 0.0], 0.0),
    ];
    let hsi = halfspace_intersection(3, &hs, &HsiCfg::default()).unwrap();
    assert!(hsi.chebyshev_radius().abs() < 1e-9);
    assert!(hsi.interior_point()[1].abs() < 1e-9);
    assert!(hsi.contains_eps(hsi.interior_point(), 1e-9));
    // the working-volume square on y = 0
    assert_eq!(hsi.vertices().len(), 4);
}

#[test]
fn feasibility_slack_is_tunable() {
    // x <= 0 and x >= 1e-7: a sliver gap that only a loose slack accepts
    let hs = vec![
        Hs::from_slice(&[1.0, 0.0], 0.0),
        Hs::from_slice(&[-1.0, 0.0], -1e-7),
    ];
    assert_eq!(
        halfspace_intersection(2, &hs, &HsiCfg::default()),
        Err(HsiError::Infeasible)
    );
    let loose = HsiCfg::default().with_eps_feas(1e-6);
    let hsi = halfspace_intersection(2, &hs, &loose).unwrap();
    assert_eq!(hsi.chebyshev_radius(), 0.0);
    assert!(hsi.interior_point()[0].abs() < 1e-6);
}

#[test]
fn working_volume_bound_is_tunable() {
    // y >= 2000 only exists outside the default working volume
    let hs = vec![Hs::from_slice(&[0.0, -1.0, 0.0], -2000.0)];
    assert_eq!(
        halfspace_intersection(3, &hs, &HsiCfg::default()),
        Err(HsiError::Infeasible)
    );
    let wide = HsiCfg::default().with_bound(5000.0);
    let hsi = halfspace_intersection(3, &hs, &wide).unwrap();
    assert!(hsi.interior_point()[1] >= 2000.0);
}

#[test]
fn parallel_duplicates_coalesce() {
    let hs = vec![
        Hs::from_slice(&[0.0, 2.0, 0.0], 2.0),
        Hs::from_slice(&[0.0, 1.0, 0.0], 0.5),
    ];
    let hsi = halfspace_intersection(3, &hs, &HsiCfg::default()).unwrap();
    assert_eq!(hsi.halfspaces().len(), 1);
    assert_relative_eq!(hsi.halfspaces()[0].c, 0.5, epsilon = 1e-12);
    assert_relative_eq!(hsi.halfspaces()[0].n.norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn malformed_input_is_rejected() {
    let cfg = HsiCfg::default();
    assert_eq!(
        halfspace_intersection(0, &[], &cfg),
        Err(HsiError::ZeroDimension)
    );
    assert_eq!(
        halfspace_intersection(3, &[Hs::from_slice(&[1.0, 0.0], 1.0)], &cfg),
        Err(HsiError::DimensionMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        halfspace_intersection(2, &[Hs::from_slice(&[0.0, 0.0], 1.0)], &cfg),
        Err(HsiError::DegenerateNormal)
    );
}

#[test]
fn with_halfspace_and_intersect_cut_the_square() {
    let cfg = HsiCfg::default();
    let square = halfspace_intersection(2, &unit_square(), &cfg).unwrap();
    // keep x <= 0.25
    let cut = square
        .with_halfspace(Hs::from_slice(&[1.0, 0.0], 0.25), &cfg)
        .unwrap();
    assert!(cut.interior_point()[0] <= 0.25 + 1e-9);
    assert_eq!(cut.vertices().len(), 4);

    let far = halfspace_intersection(2, &[Hs::from_slice(&[-1.0, 0.0], -3.0)], &cfg).unwrap();
    assert_eq!(square.intersect(&far, &cfg), Err(HsiError::Infeasible));

    let solid = halfspace_intersection(3, &cube(1.0), &cfg).unwrap();
    assert!(matches!(
        square.intersect(&solid, &cfg),
        Err(HsiError::DimensionMismatch { .. })
    ));
}
