use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use palettized::bench::{
    rasterize_with_shader, ClipScratch, FrameBuffer, Frustum, LightTable, PaletteLighting,
    ScreenTriangle, SingleTextureShader, TexelGrid,
};
use palettized::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f64>) {
    let size = (BUFFER_WIDTH * BUFFER_HEIGHT) as usize;
    (vec![0u32; size], vec![f64::INFINITY; size])
}

fn checker_texture() -> TexelGrid {
    let mut grid = TexelGrid::new(64, 64);
    for (i, texel) in grid.texels_mut().iter_mut().enumerate() {
        let (x, y) = (i % 64, i / 64);
        *texel = if (x / 8 + y / 8) % 2 == 0 { 200 } else { 100 };
    }
    grid
}

fn identity_light_table() -> TexelGrid {
    let mut grid = TexelGrid::new(256, 8);
    for (i, texel) in grid.texels_mut().iter_mut().enumerate() {
        *texel = (i % 256) as u8;
    }
    grid
}

fn screen_triangle(points: [(f64, f64); 3]) -> ScreenTriangle {
    ScreenTriangle::new(
        points.map(|(x, y)| Vec2::new(x, y)),
        [2.0, 3.0, 4.0],
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)],
        [Vec3::ZERO; 3],
        0.0,
    )
}

fn small_triangle() -> ScreenTriangle {
    screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> ScreenTriangle {
    screen_triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])
}

fn large_triangle() -> ScreenTriangle {
    screen_triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let texture = checker_texture();
    let table = identity_light_table();
    let palette: Vec<u32> = (0..256).map(|i| 0xFF000000 | i).collect();
    let lighting = PaletteLighting::new(&palette, LightTable::new(&table));
    let shader = SingleTextureShader::new(&texture);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("edge_function", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                fb.clear(0);
                rasterize_with_shader(black_box(tri), &shader, &lighting, Vec2::ZERO, &mut fb)
            });
        });
    }

    group.finish();
}

/// A wall of `columns * rows` unit quads at z = 4, facing the camera.
fn wall(columns: i32, rows: i32, material: ObjectMaterialId) -> Vec<RenderTriangle> {
    let mut triangles = Vec::new();
    for column in 0..columns {
        for row in 0..rows {
            let x0 = column as f64 - columns as f64 / 2.0;
            let y0 = row as f64 - rows as f64 / 2.0;
            let (x1, y1) = (x0 + 1.0, y0 + 1.0);
            triangles.push(RenderTriangle::new(
                [Vec3::new(x0, y0, 4.0), Vec3::new(x0, y1, 4.0), Vec3::new(x1, y0, 4.0)],
                [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
                material,
                0.0,
            ));
            triangles.push(RenderTriangle::new(
                [Vec3::new(x1, y0, 4.0), Vec3::new(x0, y1, 4.0), Vec3::new(x1, y1, 4.0)],
                [Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
                material,
                0.0,
            ));
        }
    }
    triangles
}

fn camera() -> RenderCamera {
    RenderCamera::new(
        ChunkCoord::default(),
        Vec3::ZERO,
        Vec3::FORWARD,
        60.0,
        BUFFER_WIDTH as f64 / BUFFER_HEIGHT as f64,
    )
}

fn benchmark_clipping(c: &mut Criterion) {
    // Twice as wide as the view, so edge quads get clipped.
    let triangles = wall(20, 10, ObjectMaterialId(0));
    let frustum = Frustum::from_camera(&camera());
    let mut scratch = ClipScratch::new();

    c.bench_function("clip_400_triangles", |b| {
        b.iter(|| scratch.process(black_box(&triangles), &frustum).len());
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let mut renderer = SoftwareRenderer::new();
    renderer.init(&RenderInitSettings::new(BUFFER_WIDTH, BUFFER_HEIGHT));

    let palette = renderer.try_create_object_texture(256, 1, true).unwrap();
    if let LockedTexture::Palette(colors) = renderer.lock_object_texture(palette).unwrap() {
        for (i, color) in colors.iter_mut().enumerate() {
            *color = 0xFF000000 | i as u32;
        }
    }
    let light_table = renderer
        .try_create_object_texture_from_asset(&TextureAsset::Paletted {
            width: 256,
            height: 8,
            texels: identity_light_table().texels().to_vec(),
        })
        .unwrap();
    let texture = renderer
        .try_create_object_texture_from_asset(&TextureAsset::Paletted {
            width: 64,
            height: 64,
            texels: checker_texture().texels().to_vec(),
        })
        .unwrap();
    let material = renderer.try_create_object_material(texture).unwrap();

    let triangles = wall(20, 10, material);
    let settings = RenderFrameSettings::new(palette, light_table);
    let camera = camera();
    let mut output = vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];

    c.bench_function("submit_frame_400_triangles", |b| {
        b.iter(|| {
            renderer
                .submit_frame(&camera, black_box(&triangles), &[], &[], &settings, &mut output)
                .unwrap();
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_clipping,
    benchmark_frame
);
criterion_main!(benches);
