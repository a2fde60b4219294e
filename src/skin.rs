//! Per-face texture tables for box primitives.
//!
//! A skin decides which texture, if any, colors each face of a box, and in
//! which plane the texture is addressed. The box geometry stays untouched;
//! the skin runs on the finished hit.

use glam::Vec3A;

use crate::cuboid::{BoxFace, Cuboid};
use crate::error::Result;
use crate::material::Color;
use crate::texture::{sample_tiled, TextureProvider};

/// Face test order used by skins: top first, then the z faces, the x faces
/// and the bottom last.
const SKIN_ORDER: [BoxFace; 6] = [
    BoxFace::MaxY,
    BoxFace::MinZ,
    BoxFace::MaxZ,
    BoxFace::MinX,
    BoxFace::MaxX,
    BoxFace::MinY,
];

/// Texture applied to one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTexture {
    pub key: String,
    /// Face whose in-plane axes give the texture coordinates. Usually the
    /// textured face itself.
    pub coords: BoxFace,
}

/// Texture keys for the faces of a box. Faces without an entry keep the
/// material's diffuse color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    faces: [Option<FaceTexture>; 6],
}

impl Skin {
    /// Skin with every face untextured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture `face` with `key`, addressed in the face's own plane.
    pub fn with_face(self, face: BoxFace, key: &str) -> Self {
        self.with_face_coords(face, key, face)
    }

    /// Texture `face` with `key`, addressed in the plane of `coords`.
    pub fn with_face_coords(mut self, face: BoxFace, key: &str, coords: BoxFace) -> Self {
        self.faces[face as usize] = Some(FaceTexture {
            key: key.to_string(),
            coords,
        });
        self
    }

    /// One texture on the top and the four sides; the bottom is untextured.
    pub fn uniform(key: &str) -> Self {
        [BoxFace::MaxY, BoxFace::MinZ, BoxFace::MaxZ, BoxFace::MinX, BoxFace::MaxX]
            .into_iter()
            .fold(Self::new(), |skin, face| skin.with_face(face, key))
    }

    /// Grass on the top and on the `min.z` face, netherrack on the other
    /// sides, untextured bottom.
    ///
    /// The `min.z` face takes the top's x/z texture coordinates.
    pub fn grass_block() -> Self {
        Self::uniform("netherrack")
            .with_face(BoxFace::MaxY, "grass")
            .with_face_coords(BoxFace::MinZ, "grass", BoxFace::MaxY)
    }

    pub fn face(&self, face: BoxFace) -> Option<&FaceTexture> {
        self.faces[face as usize].as_ref()
    }

    /// Every texture key the skin may sample.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().flatten().map(|f| f.key.as_str())
    }

    /// Texture color at a point on the box surface.
    ///
    /// The face is re-derived from the point rather than taken from the hit
    /// normal. None when the point lies on no face or the face is untextured.
    pub fn color_at(
        &self,
        cuboid: &Cuboid,
        point: Vec3A,
        textures: &dyn TextureProvider,
    ) -> Result<Option<Color>> {
        let Some(face) = cuboid.face_in_order(point, &SKIN_ORDER) else {
            return Ok(None);
        };
        let Some(texture) = self.face(face) else {
            return Ok(None);
        };
        let (u, v) = cuboid.local_coords(point, texture.coords);
        sample_tiled(textures, &texture.key, u, v).map(Some)
    }
}
