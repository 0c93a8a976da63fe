//! UV-space triangle checks.

use lex_primitives::Vec2;

/// Triangle corners as (vertex index, uv) pairs.
type Corner = (u32, Vec2);

fn uv_triangles<'a>(triangles: &'a [u32], uv: &'a [Vec2]) -> impl Iterator<Item = [Corner; 3]> + 'a {
	triangles.chunks_exact(3).filter_map(move |t| {
		let corner = |i: u32| uv.get(i as usize).map(|p| (i, *p));
		Some([corner(t[0])?, corner(t[1])?, corner(t[2])?])
	})
}

/// Signed UV area of a triangle; positive means clockwise in mesh space.
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
	(b - a).cross(c - a)
}

/// True if any triangle's UVs are mirrored.
pub fn has_flipped_uvs(triangles: &[u32], uv: &[Vec2]) -> bool {
	uv_triangles(triangles, uv).any(|[a, b, c]| signed_area(a.1, b.1, c.1) > 0.0)
}

/// True if any two triangles overlap in UV space.
///
/// Pairs sharing a vertex index are adjacent by construction and skipped.
pub fn has_overlapping_uvs(triangles: &[u32], uv: &[Vec2]) -> bool {
	if uv.is_empty() || triangles.len() < 6 {
		return false;
	}
	let tris: Vec<[Corner; 3]> = uv_triangles(triangles, uv).collect();
	tris.iter().enumerate().any(|(i, a)| {
		tris[i + 1..].iter().any(|b| {
			!shares_vertex(a, b) && triangles_overlap([a[0].1, a[1].1, a[2].1], [b[0].1, b[1].1, b[2].1])
		})
	})
}

fn shares_vertex(a: &[Corner; 3], b: &[Corner; 3]) -> bool {
	a.iter().any(|(i, _)| b.iter().any(|(j, _)| i == j))
}

/// Separating-axis test over the six edge normals of both triangles.
/// Touching edges count as overlap.
pub fn triangles_overlap(a: [Vec2; 3], b: [Vec2; 3]) -> bool {
	let edges = |t: [Vec2; 3]| [t[1] - t[0], t[2] - t[1], t[0] - t[2]];
	edges(a)
		.into_iter()
		.chain(edges(b))
		.map(Vec2::perpendicular)
		.all(|axis| {
			let (min_a, max_a) = project(&a, axis);
			let (min_b, max_b) = project(&b, axis);
			max_a >= min_b && max_b >= min_a
		})
}

fn project(points: &[Vec2; 3], axis: Vec2) -> (f32, f32) {
	points.iter().fold((f32::MAX, f32::MIN), |(min, max), p| {
		let d = p.dot(axis);
		(min.min(d), max.max(d))
	})
}
