use super::{MeshData, Vertex};

// Face-major order: front, back, left, right, top, bottom.
#[rustfmt::skip]
const CUBE_POSITIONS: [[f32; 3]; 24] = [
    [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0],
];

#[rustfmt::skip]
const CUBE_UVS: [[f32; 2]; 24] = [
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // front
    4, 6, 5, 4, 7, 6, // back
    8, 9, 10, 8, 10, 11, // left
    12, 13, 14, 12, 14, 15, // right
    16, 17, 18, 16, 18, 19, // top
    20, 22, 21, 20, 23, 22, // bottom
];

pub(super) fn cube() -> MeshData {
    let vertices = CUBE_POSITIONS
        .iter()
        .zip(CUBE_UVS.iter())
        .map(|(&pos, &uv)| Vertex::new(pos, uv))
        .collect();

    MeshData {
        label: "cube",
        vertices,
        indices: CUBE_INDICES.to_vec(),
    }
}

pub(super) fn floor(half_extent: f32, uv_repeat: f32) -> MeshData {
    let e = half_extent;
    let r = uv_repeat;
    MeshData {
        label: "floor",
        vertices: vec![
            Vertex::new([e, 0.0, e], [r, 0.0]),
            Vertex::new([e, 0.0, -e], [r, r]),
            Vertex::new([-e, 0.0, -e], [0.0, r]),
            Vertex::new([-e, 0.0, e], [0.0, 0.0]),
        ],
        // Fan around vertex 0.
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_24_vertices_and_12_triangles() {
        let c = cube();
        assert_eq!(c.vertices.len(), 24);
        assert_eq!(c.indices.len(), 36);
        assert!(c.is_well_formed());
    }

    #[test]
    fn cube_spans_unit_half_extent() {
        let c = cube();
        for v in &c.vertices {
            assert!(v.pos.iter().all(|x| x.abs() == 1.0));
            assert!(v.uv.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn cube_faces_are_planar() {
        // Each group of four vertices shares one constant coordinate.
        let c = cube();
        for face in c.vertices.chunks(4) {
            let planar = (0..3).any(|axis| face.iter().all(|v| v.pos[axis] == face[0].pos[axis]));
            assert!(planar);
        }
    }

    #[test]
    fn floor_lies_on_xz_plane() {
        let f = floor(5.0, 2.0);
        assert!(f.is_well_formed());
        assert_eq!(f.vertices.len(), 4);
        assert!(f.vertices.iter().all(|v| v.pos[1] == 0.0));
        assert!(f.vertices.iter().any(|v| v.uv == [2.0, 2.0]));
    }

    #[test]
    fn out_of_range_index_is_not_well_formed() {
        let mut f = floor(1.0, 1.0);
        f.indices[5] = 4;
        assert!(!f.is_well_formed());
    }
}
