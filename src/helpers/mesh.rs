use bevy::asset::RenderAssetUsages;
use bevy::math::Vec3;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;

/// The 12 edges of a box centred on the origin, as a line list.
pub fn box_edges_mesh(size: Vec3) -> Mesh {
    let h = size / 2.0;

    // Bottom face 0..4, top face 4..8, both counter-clockwise seen from above
    let positions: Vec<[f32; 3]> = vec![
        [-h.x, -h.y, -h.z],
        [h.x, -h.y, -h.z],
        [h.x, -h.y, h.z],
        [-h.x, -h.y, h.z],
        [-h.x, h.y, -h.z],
        [h.x, h.y, -h.z],
        [h.x, h.y, h.z],
        [-h.x, h.y, h.z],
    ];

    let mut indices = Vec::with_capacity(24);
    for i in 0..4u32 {
        let next = (i + 1) % 4;
        indices.extend_from_slice(&[i, next]); // bottom
        indices.extend_from_slice(&[i + 4, next + 4]); // top
        indices.extend_from_slice(&[i, i + 4]); // vertical
    }

    // Lines are drawn unlit, the normals only satisfy the standard pipeline
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_twelve_edges() {
        let mesh = box_edges_mesh(Vec3::splat(5.0));
        assert_eq!(mesh.count_vertices(), 8);
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(24));
    }

    #[test]
    fn corners_sit_on_half_extents() {
        let mesh = box_edges_mesh(Vec3::new(2.0, 4.0, 6.0));
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        for [x, y, z] in positions {
            assert_eq!(x.abs(), 1.0);
            assert_eq!(y.abs(), 2.0);
            assert_eq!(z.abs(), 3.0);
        }
    }
}
