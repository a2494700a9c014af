//! Glyph-atlas meshes built against the recording context.

mod common;

use std::sync::Arc;

use common::{RecordingContext, RecordingMaterial};
use glam::vec2;
use meshkit::{GlyphAtlas, GlyphMetrics, TextureRole};

fn atlas() -> GlyphAtlas {
    GlyphAtlas::new(
        GlyphMetrics {
            first_char: ' ',
            chars_per_row: 16,
            glyph_width: 7,
            glyph_height: 12,
        },
        112,
        72,
    )
}

#[test]
fn text_mesh_carries_the_atlas_as_its_single_diffuse_texture() {
    let gl = Arc::new(RecordingContext::default());
    let material = RecordingMaterial::default();

    let mesh = atlas()
        .build_mesh(&gl, "hello", vec2(0.0, 0.0), 12.0, 42)
        .unwrap();
    mesh.draw(&material);

    assert_eq!(mesh.index_count(), 5 * 6);
    assert_eq!(mesh.textures().len(), 1);
    assert_eq!(mesh.textures()[0].role, TextureRole::Diffuse);
    assert_eq!(material.samplers(), vec![("material.diffuse1".to_string(), 0)]);
    assert_eq!(gl.texture_on_unit(0), Some(42));
}

#[test]
fn empty_text_builds_an_empty_but_valid_mesh() {
    let gl = Arc::new(RecordingContext::default());
    let material = RecordingMaterial::default();

    let mesh = atlas()
        .build_mesh(&gl, "", vec2(0.0, 0.0), 12.0, 42)
        .unwrap();
    mesh.draw(&material);

    assert_eq!(mesh.index_count(), 0);
    let draws = gl.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].1, 0);
    drop(mesh);
    assert_eq!(gl.live_resources(), 0);
}
