use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use crate::geometry::Ring;
use crate::math::distance_2d::{point_to_segment_dist, projection_param};
use crate::math::polygon_2d::{remove_collinear, rotate_to_canonical_start};
use crate::math::Point2;

/// Turns a soup of directed edges into clean rings.
///
/// The edges may come from several clipped fragments whose union is the
/// wanted region. Edges are split wherever another edge's endpoint lies on
/// them, coincident edges running in opposite directions cancel, and what
/// remains is traced into closed rings. At a vertex with several outgoing
/// edges the walk takes the sharpest left turn, so pieces that only touch at
/// a corner come out as separate rings.
///
/// Rings with an area below `eps²` are dropped.
#[must_use]
pub fn assemble_rings(edges: &[(Point2, Point2)], eps: f64) -> Vec<Ring> {
    let mut points: Vec<Point2> = Vec::new();
    let mut raw: Vec<(usize, usize)> = Vec::new();
    for (a, b) in edges {
        let si = ensure_point(&mut points, *a, eps);
        let ei = ensure_point(&mut points, *b, eps);
        if si != ei {
            raw.push((si, ei));
        }
    }
    if raw.is_empty() {
        return Vec::new();
    }

    let split = split_at_vertices(&raw, &points, eps);
    let edge_list = cancel_opposite(&split);
    if edge_list.is_empty() {
        return Vec::new();
    }

    trace_rings(&edge_list, &points, eps)
}

/// Finds or inserts a point, returning its index.
fn ensure_point(points: &mut Vec<Point2>, p: Point2, eps: f64) -> usize {
    if let Some(i) = points.iter().position(|q| (q - p).norm() <= eps) {
        return i;
    }
    points.push(p);
    points.len() - 1
}

/// Splits every edge at the pooled vertices lying strictly inside it.
fn split_at_vertices(edges: &[(usize, usize)], points: &[Point2], eps: f64) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(edges.len());
    for &(si, ei) in edges {
        let a = points[si];
        let b = points[ei];
        let len = (b - a).norm();
        let mut on_edge: Vec<(f64, usize)> = points
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != si && k != ei)
            .filter_map(|(k, q)| {
                let t = projection_param(q, &a, &b);
                let inside = t * len > eps && (1.0 - t) * len > eps;
                (inside && point_to_segment_dist(q, &a, &b) <= eps).then_some((t, k))
            })
            .collect();
        on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut prev = si;
        for (_, k) in on_edge {
            out.push((prev, k));
            prev = k;
        }
        out.push((prev, ei));
    }
    out
}

/// Removes pairs of coincident edges with opposite directions.
fn cancel_opposite(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for &e in edges {
        *counts.entry(e).or_insert(0) += 1;
    }

    let mut out = Vec::with_capacity(edges.len());
    for &(si, ei) in edges {
        let reverse = counts.get(&(ei, si)).copied().unwrap_or(0);
        let forward = counts.get(&(si, ei)).copied().unwrap_or(0);
        if forward == 0 {
            continue;
        }
        if reverse > 0 {
            counts.insert((ei, si), reverse - 1);
            counts.insert((si, ei), forward - 1);
            continue;
        }
        counts.insert((si, ei), forward - 1);
        out.push((si, ei));
    }
    out
}

fn trace_rings(edge_list: &[(usize, usize)], points: &[Point2], eps: f64) -> Vec<Ring> {
    // Adjacency list: point_idx -> list of (edge_idx, target_point_idx).
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); points.len()];
    for (edge_idx, &(si, ei)) in edge_list.iter().enumerate() {
        adjacency[si].push((edge_idx, ei));
    }

    let mut used = vec![false; edge_list.len()];
    let mut rings = Vec::new();

    while let Some(start_edge) = find_start_edge(edge_list, &used, points) {
        let Some(boundary) = trace_one_ring(start_edge, edge_list, &adjacency, points, &mut used) else {
            continue;
        };
        let cleaned = remove_collinear(&boundary, eps);
        let ring = Ring::from_raw(rotate_to_canonical_start(&cleaned));
        if !ring.is_degenerate(eps) {
            rings.push(ring);
        }
    }

    rings
}

/// Finds the next unused edge starting from the point with lowest y (then x).
fn find_start_edge(edge_list: &[(usize, usize)], used: &[bool], points: &[Point2]) -> Option<usize> {
    let mut best: Option<(usize, Point2)> = None;
    for (edge_idx, &(si, _)) in edge_list.iter().enumerate() {
        if used[edge_idx] {
            continue;
        }
        let p = points[si];
        match best {
            Some((_, b)) if !(p.y < b.y || (p.y - b.y).abs() < f64::EPSILON && p.x < b.x) => {}
            _ => best = Some((edge_idx, p)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Walks one closed ring. Returns `None` if the walk dead-ends.
fn trace_one_ring(
    start_edge: usize,
    edge_list: &[(usize, usize)],
    adjacency: &[Vec<(usize, usize)>],
    points: &[Point2],
    used: &mut [bool],
) -> Option<Vec<Point2>> {
    let start_point = edge_list[start_edge].0;
    let mut boundary = Vec::new();
    let mut current = start_edge;

    loop {
        used[current] = true;
        let (si, ei) = edge_list[current];
        boundary.push(points[si]);
        if ei == start_point {
            return Some(boundary);
        }
        let d = points[ei] - points[si];
        current = pick_next_edge(ei, d.y.atan2(d.x), adjacency, points, used)?;
    }
}

/// Picks the outgoing edge making the sharpest left turn.
fn pick_next_edge(
    node: usize,
    incoming_angle: f64,
    adjacency: &[Vec<(usize, usize)>],
    points: &[Point2],
    used: &[bool],
) -> Option<usize> {
    let reverse_angle = normalize_angle(incoming_angle + PI);
    let mut best: Option<(usize, f64)> = None;

    for &(edge_idx, target) in &adjacency[node] {
        if used[edge_idx] {
            continue;
        }
        let d = points[target] - points[node];
        // Angle measured counter-clockwise from the way we came in; larger
        // means a sharper left turn. Going straight back scores zero.
        let delta = normalize_angle(d.y.atan2(d.x) - reverse_angle);
        if best.is_none_or(|(_, bd)| delta > bd) {
            best = Some((edge_idx, delta));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Normalizes an angle to [0, 2pi).
fn normalize_angle(a: f64) -> f64 {
    let r = a % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}
