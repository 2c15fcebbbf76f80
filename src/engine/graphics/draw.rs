//! Immediate-mode draw list built on the CPU every frame and handed to the renderer.
//!
//! Positions are transformed to clip space while they are recorded, so the GPU side is a
//! single pass-through shader. Primitives that share texture, depth and clip state are
//! merged into one draw call.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::engine::graphics::texture::TextureId;
use crate::engine::graphics::vertex::Vertex;
use crate::engine::render2d::rect::Rect;
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};

pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

const LIGHT_AMBIENT: f32 = 0.5;
const LIGHT_DIFFUSE: f32 = 1.0;
const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.0);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    Perspective,
    Ortho2D,
}

/// A vertex as the demos describe it, before projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub position: Vec3,
    pub tex_coords: Vec2,
    pub color: Color,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            tex_coords: Vec2::ZERO,
            color: WHITE,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn rgb(self, r: f32, g: f32, b: f32) -> Self {
        self.color([r, g, b, 1.0])
    }

    pub fn uv(mut self, u: f32, v: f32) -> Self {
        self.tex_coords = Vec2::new(u, v);
        self
    }
}

/// Texture coordinates of a sub-image; `v0` is the top row of the region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    pub const FULL: UvRect = UvRect { u0: 0.0, v0: 0.0, u1: 1.0, v1: 1.0 };

    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub texture: Option<TextureId>,
    pub depth_test: bool,
    pub clip: Option<Rect>,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

pub struct DrawList {
    clear_color: Color,
    vertices: Vec<Vertex>,
    calls: Vec<DrawCall>,
    projection: Projection,
    model: Mat4,
    texture: Option<TextureId>,
    depth_test: bool,
    clip: Option<Rect>,
    lighting: bool,
    normal: Vec3,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            clear_color: BLACK,
            vertices: Vec::new(),
            calls: Vec::new(),
            projection: Projection::Perspective,
            model: Mat4::IDENTITY,
            texture: None,
            depth_test: true,
            clip: None,
            lighting: false,
            normal: Vec3::Z,
        }
    }

    /// Starts a new frame: drops recorded geometry and sets the clear color.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.calls.clear();
        self.begin_3d();
    }

    /// Perspective projection with depth testing, identity model matrix, no texture.
    pub fn begin_3d(&mut self) {
        self.projection = Projection::Perspective;
        self.model = Mat4::IDENTITY;
        self.texture = None;
        self.depth_test = true;
        self.clip = None;
        self.normal = Vec3::Z;
    }

    /// Orthographic projection over the internal resolution with the origin bottom-left.
    pub fn begin_2d(&mut self) {
        self.projection = Projection::Ortho2D;
        self.model = Mat4::IDENTITY;
        self.texture = None;
        self.depth_test = false;
        self.clip = None;
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    pub fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.lighting = enabled;
    }

    /// Normal used for lighting the following vertices.
    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal.normalize_or_zero();
    }

    pub fn triangle(&mut self, points: [Point3; 3]) {
        let projected = points.map(|p| self.project(p));
        self.push(&projected);
    }

    /// Quad given in winding order, split into two triangles.
    pub fn quad(&mut self, points: [Point3; 4]) {
        let [a, b, c, d] = points.map(|p| self.project(p));
        self.push(&[a, b, c, c, d, a]);
    }

    /// Axis-aligned 2D rectangle rotated by `rotation_degrees` about its centre.
    pub fn sprite_quad(&mut self, rect: Rect, uv: UvRect, rotation_degrees: f32, color: Color) {
        let (cx, cy) = rect.center();
        let half_w = rect.width() * 0.5;
        let half_h = rect.height() * 0.5;
        let (sin, cos) = rotation_degrees.to_radians().sin_cos();
        let corner = |dx: f32, dy: f32, u: f32, v: f32| {
            Point3::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos, 0.0)
                .uv(u, v)
                .color(color)
        };
        self.quad([
            corner(-half_w, -half_h, uv.u0, uv.v1),
            corner(half_w, -half_h, uv.u1, uv.v1),
            corner(half_w, half_h, uv.u1, uv.v0),
            corner(-half_w, half_h, uv.u0, uv.v0),
        ]);
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh(
                FIELD_OF_VIEW_DEGREES.to_radians(),
                INTERNAL_RES_X / INTERNAL_RES_Y,
                Z_NEAR,
                Z_FAR,
            ),
            Projection::Ortho2D => Mat4::orthographic_rh(0.0, INTERNAL_RES_X, 0.0, INTERNAL_RES_Y, -1.0, 1.0),
        }
    }

    fn project(&self, point: Point3) -> Vertex {
        let eye = self.model * point.position.extend(1.0);
        let clip: Vec4 = self.projection_matrix() * eye;
        let mut color = point.color;
        if self.lighting && self.projection == Projection::Perspective {
            let normal = self.model.transform_vector3(self.normal).normalize_or_zero();
            let to_light = (LIGHT_POSITION - eye.truncate()).normalize_or_zero();
            let factor = (LIGHT_AMBIENT + LIGHT_DIFFUSE * normal.dot(to_light).max(0.0)).min(1.0);
            for channel in color.iter_mut().take(3) {
                *channel *= factor;
            }
        }
        Vertex {
            position: clip.to_array(),
            tex_coords: point.tex_coords.to_array(),
            color,
        }
    }

    fn push(&mut self, vertices: &[Vertex]) {
        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        let count = vertices.len() as u32;

        if let Some(last) = self.calls.last_mut() {
            if last.texture == self.texture
                && last.depth_test == self.depth_test
                && last.clip == self.clip
                && last.first_vertex + last.vertex_count == first_vertex
            {
                last.vertex_count += count;
                return;
            }
        }
        self.calls.push(DrawCall {
            texture: self.texture,
            depth_test: self.depth_test,
            clip: self.clip,
            first_vertex,
            vertex_count: count,
        });
    }
}
