/// WGSL shader for chunk meshes.
///
/// Positions arrive chunk-local and are offset by the chunk origin. Faces are
/// tinted by their normal; there is no lighting.
pub const CHUNK_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct Model {
    origin: vec4<f32>,
};

@group(1) @binding(0)
var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = vec4<f32>(vertex.position + model.origin.xyz, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world_pos;
    out.normal = vertex.normal;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = abs(in.normal) * 0.6 + vec3<f32>(0.2, 0.2, 0.2);
    // Negative-facing faces are darker so opposite sides stay distinguishable.
    let facing = select(0.7, 1.0, dot(in.normal, vec3<f32>(1.0, 1.0, 1.0)) > 0.0);
    return vec4<f32>(base * facing, 1.0);
}
"#;
