//! Diorama ray tracer
//!
//! A Whitted-style recursive ray tracer: every primary ray finds its nearest
//! surface, is lit by a single point light with Lambert and Phong terms and a
//! shadow test, and blends in recursively traced reflection and refraction
//! rays up to a fixed depth. Rays that escape sample a textured skybox.
//!
//! Spheres and axis-aligned boxes are the primitives; boxes can wear a
//! [`skin::Skin`] that textures their faces. Frames are written as PNG or EXR.

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod cuboid;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod ray;
pub mod scene;
pub mod shadow;
pub mod skin;
pub mod skybox;
pub mod sphere;
pub mod texture;
pub mod tracer;
