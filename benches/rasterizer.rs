use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softshade::camera::Camera;
use softshade::engine::{Engine, Scene};
use softshade::light::Light;
use softshade::material::Material;
use softshade::math::{Vec2, Vec3};
use softshade::mesh::Mesh;
use softshade::model::Model;
use softshade::render::framebuffer::DEPTH_CLEAR;
use softshade::render::{rasterize_triangle, FlatShader, FrameBuffer, Triangle, Vertex};
use softshade::transform::Transform;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f32>) {
    let size = (BUFFER_WIDTH * BUFFER_HEIGHT) as usize;
    (vec![0u32; size], vec![DEPTH_CLEAR; size])
}

fn screen_vertex(x: f32, y: f32) -> Vertex {
    Vertex {
        position: Vec3::new(x, y, 0.5),
        clip_w: 1.0,
        inv_w: 1.0,
        texcoord: Vec2::new(x / BUFFER_WIDTH as f32, y / BUFFER_HEIGHT as f32),
        normal: Vec3::BACK,
        world_position: Vec3::ZERO,
    }
}

fn screen_triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle::new(points.map(|(x, y)| screen_vertex(x, y)))
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let shader = FlatShader::new(Vec3::new(1.0, 0.0, 0.0));

    for (name, triangle) in [
        ("small", screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])),
        ("medium", screen_triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])),
        ("large", screen_triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])),
    ] {
        group.bench_with_input(BenchmarkId::new("edge_function", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                depth.fill(DEPTH_CLEAR);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterize_triangle(black_box(tri), &mut fb, &shader)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let shader = FlatShader::new(Vec3::new(1.0, 0.0, 0.0));

    // A 20x20 grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                screen_triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    c.bench_function("edge_function_400_triangles", |b| {
        let (mut color, mut depth) = create_buffers();
        b.iter(|| {
            depth.fill(DEPTH_CLEAR);
            let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
            for tri in &triangles {
                rasterize_triangle(black_box(tri), &mut fb, &shader);
            }
        });
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let scene = Scene::new(
        Camera::new(Vec3::new(0.0, 2.0, 8.0), 5.0, -90.0, -10.0),
        vec![
            Light::directional(Vec3::new(1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 0.8), 0.8),
            Light::point(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.2, 0.2, 0.5), 10.0),
        ],
    );
    let mut transform = Transform::new();
    transform.set_position(Vec3::new(0.0, 1.0, 0.0));
    let models = [
        Model::new("ground", Mesh::plane(40.0), Material::new(0.1, 0.7, 0.5, 32.0)),
        Model::new("cube", Mesh::cube(), Material::new(0.1, 0.8, 0.1, 5.0))
            .with_transform(transform),
    ];

    let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);
    c.bench_function("frame_ground_and_cube", |b| {
        b.iter(|| engine.render(black_box(&scene), black_box(&models)));
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_frame
);
criterion_main!(benches);
