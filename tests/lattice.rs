extern crate vptree;

use vptree::{MetricItem, VPTree};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f32,
    y: f32,
}

impl Point {
    fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl MetricItem for Point {
    type Distance = f32;

    fn distance(&self, q: &Self) -> f32 {
        let dx = self.x - q.x;
        let dy = self.y - q.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[test]
fn point_check() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);

    assert_eq!(a.distance(&b), 1.0);
}

fn lattice_points(n: usize) -> Vec<Point> {
    (0..n)
        .flat_map(|i| (0..n).map(move |j| Point::new(i as f32, j as f32)))
        .collect()
}

#[test]
fn lattice_vpn() {
    let points: Vec<Point> = lattice_points(20);
    let tree = VPTree::new(points);

    let x = tree.nearest_neighbor(&Point::new(4.1, 4.0)).unwrap().0;
    assert_eq!(*x, Point::new(4.0, 4.0));

    let (ps, stats) = tree.search_with_stats(&Point::new(4.46, 4.4), 4);
    println!("nodes traversed: {}", stats.visited);
    assert!(stats.visited < 400);

    let found: Vec<Point> = ps.iter().map(|n| *n.item).collect();
    assert_eq!(
        found,
        vec![
            Point::new(4.0, 4.0),
            Point::new(5.0, 4.0),
            Point::new(4.0, 5.0),
            Point::new(5.0, 5.0),
        ]
    );
}

#[test]
fn lattice_ring() {
    let tree = VPTree::new(lattice_points(11));

    // The 3x3 block around (5, 5): the centre, 4 edge neighbors at 1 and
    // 4 corners at sqrt(2).
    let (found, dists) = tree.search(&Point::new(5.0, 5.0), 9);
    assert_eq!(found.len(), 9);
    assert_eq!(*found[0], Point::new(5.0, 5.0));
    assert_eq!(dists[0], 0.0);
    assert!(dists[1..5].iter().all(|d| *d == 1.0));
    assert!(dists[5..].iter().all(|d| (*d - 2f32.sqrt()).abs() < 1e-6));
    for p in &found {
        assert!((p.x - 5.0).abs() <= 1.0 && (p.y - 5.0).abs() <= 1.0);
    }
}
