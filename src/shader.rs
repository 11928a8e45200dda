//! WGSL sources and shared uniform layouts.
//!
//! Four small shaders cover the scene: the gradient backdrop, the static
//! starfield, the rocket sprite and the plume points. All but the backdrop
//! share [`SceneUniforms`] at group 0 binding 0.
//!
//! The plume vertex/fragment pair mirrors the CPU-side curves in
//! [`crate::visuals`]: point size shrinks with life progress, tint runs
//! fire to smoke, alpha fades to zero.

use bytemuck::{Pod, Zeroable};

/// Camera and timing data shared by every pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Combined view-projection matrix, column major.
    pub view_proj: [[f32; 4]; 4],
    /// Seconds since the demo started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Pads the struct to a 16-byte multiple for uniform buffer rules.
    pub _padding: [f32; 2],
}

/// Model transform for the rocket sprite.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpriteUniforms {
    /// Local-to-world matrix, column major. Includes the sprite scale.
    pub model: [[f32; 4]; 4],
}

/// Instanced plume points: expanded quads sized and tinted by life progress.
pub const PLUME_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

const FIRE_COLOR: vec3<f32> = vec3<f32>(1.0, 0.5, 0.0);
const SMOKE_COLOR: vec3<f32> = vec3<f32>(0.2, 0.2, 0.2);
const POINT_SCALE: f32 = 0.012;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) tint: vec3<f32>,
    @location(2) fade: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) age: f32,
    @location(3) lifespan: f32,
    @location(4) color: vec3<f32>,
) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let corner = quad[vertex_index];

    let progress = clamp(age / lifespan, 0.0, 1.0);
    let half_extent = size * (1.0 - progress) * POINT_SCALE;

    var clip = scene.view_proj * vec4<f32>(position, 1.0);
    clip.x += corner.x * half_extent * clip.w;
    clip.y += corner.y * half_extent * clip.w;

    var out: VertexOutput;
    out.clip_position = clip;
    out.uv = corner;
    out.tint = mix(FIRE_COLOR, SMOKE_COLOR, progress) * color;
    out.fade = 1.0 - progress;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let falloff = 1.0 - smoothstep(0.3, 1.0, dist);
    let alpha = falloff * in.fade;
    return vec4<f32>(in.tint * alpha, alpha);
}
"#;

/// Static stars: tiny soft dots, no twinkle.
pub const STARFIELD_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

const STAR_HALF_EXTENT: f32 = 0.0012;
const STAR_OPACITY: f32 = 0.8;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let corner = quad[vertex_index];

    var clip = scene.view_proj * vec4<f32>(position, 1.0);
    clip.x += corner.x * STAR_HALF_EXTENT * clip.w;
    clip.y += corner.y * STAR_HALF_EXTENT * clip.w;

    var out: VertexOutput;
    out.clip_position = clip;
    out.uv = corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = (1.0 - smoothstep(0.0, 1.0, dist)) * STAR_OPACITY;
    return vec4<f32>(vec3<f32>(alpha), alpha);
}
"#;

/// Fullscreen gradient: black fading into deep blue toward the bottom.
pub const BACKDROP_SHADER: &str = r#"
const HORIZON_COLOR: vec3<f32> = vec3<f32>(0.0, 0.0, 0.0667);

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) screen_v: f32,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // Fullscreen triangle.
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index & 2u) * 2 - 1);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(x, y, 1.0, 1.0);
    out.screen_v = (1.0 - y) * 0.5;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let t = smoothstep(0.7, 1.0, in.screen_v);
    return vec4<f32>(mix(vec3<f32>(0.0), HORIZON_COLOR, t), 1.0);
}
"#;

/// Textured rocket sprite quad.
pub const SPRITE_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct SpriteUniforms {
    model: mat4x4<f32>,
};

@group(1) @binding(0)
var<uniform> sprite: SpriteUniforms;
@group(1) @binding(1)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(2)
var sprite_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>( 0.5,  0.5),
    );
    let corner = quad[vertex_index];

    let world = sprite.model * vec4<f32>(corner, 0.0, 1.0);

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world;
    out.uv = vec2<f32>(corner.x + 0.5, 0.5 - corner.y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(sprite_texture, sprite_sampler, in.uv);
    if color.a < 0.01 {
        discard;
    }
    return color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_have_uniform_buffer_alignment() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<SpriteUniforms>(), 64);
    }

    #[test]
    fn every_shader_declares_both_entry_points() {
        for src in [PLUME_SHADER, STARFIELD_SHADER, BACKDROP_SHADER, SPRITE_SHADER] {
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
        }
    }
}
