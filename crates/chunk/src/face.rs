//! Cube face table driving the mesher.

use glam::IVec3;

/// One axis-aligned cube face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceDef {
    pub name: &'static str,
    /// Offset to the neighbor cell that can hide this face. Also the outward
    /// normal.
    pub offset: IVec3,
    /// Quad corners in unit-cube space, counter-clockwise seen from outside.
    pub corners: [IVec3; 4],
}

impl FaceDef {
    pub fn normal(&self) -> [f32; 3] {
        self.offset.as_vec3().to_array()
    }
}

/// Corner order for the two triangles of a quad.
pub const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Faces in emission order: front, right, back, left, top, bottom.
pub const FACES: [FaceDef; 6] = [
    FaceDef {
        name: "front",
        offset: IVec3::new(0, 0, 1),
        corners: [
            IVec3::new(0, 0, 1),
            IVec3::new(1, 0, 1),
            IVec3::new(1, 1, 1),
            IVec3::new(0, 1, 1),
        ],
    },
    FaceDef {
        name: "right",
        offset: IVec3::new(1, 0, 0),
        corners: [
            IVec3::new(1, 0, 1),
            IVec3::new(1, 0, 0),
            IVec3::new(1, 1, 0),
            IVec3::new(1, 1, 1),
        ],
    },
    FaceDef {
        name: "back",
        offset: IVec3::new(0, 0, -1),
        corners: [
            IVec3::new(1, 0, 0),
            IVec3::new(0, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(1, 1, 0),
        ],
    },
    FaceDef {
        name: "left",
        offset: IVec3::new(-1, 0, 0),
        corners: [
            IVec3::new(0, 0, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 1, 1),
            IVec3::new(0, 1, 0),
        ],
    },
    FaceDef {
        name: "top",
        offset: IVec3::new(0, 1, 0),
        corners: [
            IVec3::new(0, 1, 1),
            IVec3::new(1, 1, 1),
            IVec3::new(1, 1, 0),
            IVec3::new(0, 1, 0),
        ],
    },
    FaceDef {
        name: "bottom",
        offset: IVec3::new(0, -1, 0),
        corners: [
            IVec3::new(0, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(1, 0, 1),
            IVec3::new(0, 0, 1),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_winding_matches_outward_normal() {
        for face in &FACES {
            let a = face.corners[QUAD_TRIANGLES[0]];
            let b = face.corners[QUAD_TRIANGLES[1]];
            let c = face.corners[QUAD_TRIANGLES[2]];
            assert_eq!((b - a).cross(c - a), face.offset, "{} first triangle", face.name);

            let d = face.corners[QUAD_TRIANGLES[3]];
            let e = face.corners[QUAD_TRIANGLES[4]];
            let f = face.corners[QUAD_TRIANGLES[5]];
            assert_eq!((e - d).cross(f - d), face.offset, "{} second triangle", face.name);
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for face in &FACES {
            let axis = face.offset.abs().to_array().iter().position(|v| *v == 1).unwrap();
            let plane = if face.offset.to_array()[axis] > 0 { 1 } else { 0 };
            for corner in face.corners {
                assert_eq!(corner.to_array()[axis], plane, "{}", face.name);
            }
        }
    }

    #[test]
    fn offsets_are_unit_and_distinct() {
        for (i, a) in FACES.iter().enumerate() {
            assert_eq!(a.offset.abs().element_sum(), 1);
            for b in &FACES[i + 1..] {
                assert_ne!(a.offset, b.offset);
            }
        }
    }
}
