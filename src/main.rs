//! Renders a small textured room into memory and writes it as a PNG.
//!
//! Usage: `palettized [output.png]` (defaults to `frame.png`). Set
//! `RUST_LOG=debug` to see per-frame statistics.

use std::error::Error;

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use palettized::colors;
use palettized::prelude::*;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;
const LIGHT_LEVELS: u32 = 8;

/// Two triangles spanning `origin + s * u_axis + t * v_axis` for s, t in [0, 1],
/// facing along `v_axis × u_axis`.
fn quad(origin: Vec3, u_axis: Vec3, v_axis: Vec3, material: ObjectMaterialId, fade: f64) -> [RenderTriangle; 2] {
    let (o, u, v, uv) = (origin, origin + u_axis, origin + v_axis, origin + u_axis + v_axis);
    [
        RenderTriangle::new(
            [o, v, u],
            [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
            material,
            fade,
        ),
        RenderTriangle::new(
            [u, v, uv],
            [Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
            material,
            fade,
        ),
    ]
}

fn fill_texels(
    renderer: &mut SoftwareRenderer,
    width: u32,
    height: u32,
    texel: impl Fn(u32, u32) -> u8,
) -> Result<ObjectTextureId> {
    let id = renderer.try_create_object_texture(width, height, false)?;
    if let LockedTexture::Texels8(texels) = renderer.lock_object_texture(id)? {
        for (i, value) in texels.iter_mut().enumerate() {
            let i = i as u32;
            *value = texel(i % width, i / width);
        }
    }
    renderer.unlock_object_texture(id);
    Ok(id)
}

fn build_lighting(renderer: &mut SoftwareRenderer) -> Result<RenderFrameSettings> {
    let palette = renderer.try_create_object_texture(256, 1, true)?;
    if let LockedTexture::Palette(entries) = renderer.lock_object_texture(palette)? {
        for (i, entry) in entries.iter_mut().enumerate() {
            let i = i as f64;
            *entry = colors::rgb(i as u8, (i * 0.8) as u8, (i * 0.6) as u8);
        }
    }
    renderer.unlock_object_texture(palette);

    // Each level darkens every index a little more.
    let light_table = fill_texels(renderer, 256, LIGHT_LEVELS, |texel, level| {
        let brightness = (LIGHT_LEVELS - level) as f64 / LIGHT_LEVELS as f64;
        (texel as f64 * brightness) as u8
    })?;

    Ok(RenderFrameSettings::new(palette, light_table).with_clear_color(colors::rgb(12, 10, 24)))
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();
    let path = std::env::args().nth(1).unwrap_or_else(|| "frame.png".to_string());

    let mut renderer = SoftwareRenderer::new();
    renderer.init(&RenderInitSettings::new(WIDTH, HEIGHT));
    let settings = build_lighting(&mut renderer)?;

    let checker = fill_texels(&mut renderer, 16, 16, |x, y| if (x / 4 + y / 4) % 2 == 0 { 220 } else { 140 })?;
    let bricks = fill_texels(&mut renderer, 32, 32, |x, y| {
        let offset = if (y / 8) % 2 == 0 { 0 } else { 8 };
        if y % 8 == 0 || (x + offset) % 16 == 0 { 90 } else { 200 }
    })?;
    let moss = fill_texels(&mut renderer, 32, 32, |x, y| if y > 20 && (x * 7 + y * 3) % 5 == 0 { 120 } else { 0 })?;
    let disc = GrayImage::from_fn(16, 16, |x, y| {
        let (dx, dy) = (x as i32 - 8, y as i32 - 8);
        Luma([if dx * dx + dy * dy < 36 { 255 } else { 0 }])
    });
    let sprite = renderer
        .try_create_object_texture_from_asset(&TextureAsset::from_image(&DynamicImage::ImageLuma8(disc)))?;

    let floor = renderer.try_create_object_material(checker)?;
    let wall = renderer.try_create_object_material_layered(bricks, moss)?;
    let entity = renderer.try_create_object_material(sprite)?;

    let mut opaque = Vec::new();
    for x in 0..4 {
        for z in 0..6 {
            let origin = Vec3::new(x as f64, 0.0, z as f64);
            opaque.extend(quad(origin, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), floor, 0.0));
        }
        let origin = Vec3::new(x as f64, 0.0, 6.0);
        opaque.extend(quad(origin, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), wall, 0.0));
    }

    let entities = quad(
        Vec3::new(1.75, 0.0, 3.0),
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        entity,
        0.0,
    );

    let camera = RenderCamera::from_angles(
        ChunkCoord::new(0, 0),
        Vec3::new(2.0, 0.6, 0.25),
        0.0,
        -0.15,
        60.0,
        WIDTH as f64 / HEIGHT as f64,
    );

    let mut output = vec![0u32; (WIDTH * HEIGHT) as usize];
    renderer.submit_frame(&camera, &opaque, &[], &entities, &settings, &mut output)?;
    renderer.present();
    log::info!("{}", renderer.profiler_data());

    let image = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        Rgba(colors::to_rgba_bytes(output[(y * WIDTH + x) as usize]))
    });
    image.save(&path)?;
    println!("wrote {path}");

    renderer.shutdown();
    Ok(())
}
