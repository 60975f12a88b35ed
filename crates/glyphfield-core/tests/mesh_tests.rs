use std::collections::HashMap;

use glyphfield_core::config::{Variant, VisualConfig};
use glyphfield_core::error::{ConfigError, Error};
use glyphfield_core::mesh::ParticleMesh;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_floating_chars_mesh() {
    let mut rng = StdRng::seed_from_u64(1);
    let config = VisualConfig::floating_chars().with_particles(100);
    let mesh = ParticleMesh::with_rng(&config, &mut rng).unwrap();

    assert_eq!(mesh.geometry().particle_count(), 100);
    assert_eq!(mesh.geometry().vertex_count(), 300);
    let u = mesh.uniforms();
    assert_eq!(u.num_vertices, 100.0);
    assert_eq!(u.num_texture_grid_cols, 16.0);
    assert_eq!(u.num_texture_grid_rows, 4.0);
    assert_eq!(u.texture_txt_length, 62.0);
    assert!(mesh.material().transparent);
    assert!(mesh.material().double_sided);
    assert!(mesh.atlas().is_some());
}

#[test]
fn test_triangles_mesh_has_no_atlas() {
    let mut rng = StdRng::seed_from_u64(2);
    let mesh = ParticleMesh::with_rng(&VisualConfig::triangles().with_particles(10), &mut rng).unwrap();
    assert!(mesh.atlas().is_none());
    assert_eq!(mesh.uniforms().animation_values[0], 1.0);
}

#[test]
fn test_update_publishes_into_material() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut mesh = ParticleMesh::with_rng(&VisualConfig::floating_chars().with_particles(10), &mut rng).unwrap();
    mesh.select_animation(6);
    for _ in 0..61 {
        mesh.update();
    }
    let u = *mesh.uniforms();
    assert_eq!(u.animation_values, [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    assert!((u.time - 0.061).abs() < 1e-4);
}

#[test]
fn test_set_weight_visible_before_next_frame() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut mesh = ParticleMesh::with_rng(&VisualConfig::default().with_particles(10), &mut rng).unwrap();
    mesh.set_weight(3, 0.4);
    assert!((mesh.uniforms().animation_values[2] - 0.4).abs() < 1e-6);
}

#[test]
fn test_write_uniforms_to_named_sink() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut mesh = ParticleMesh::with_rng(&VisualConfig::default().with_particles(10), &mut rng).unwrap();
    mesh.update();
    let mut sink: HashMap<String, f32> = HashMap::new();
    mesh.write_uniforms(&mut sink);
    assert_eq!(sink["numVertices"], 10.0);
    assert_eq!(sink["animationValue1"], 1.0);
    assert!(sink.contains_key("textureTxtLength"));
}

#[test]
fn test_rebuild_replaces_geometry() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut mesh = ParticleMesh::with_rng(&VisualConfig::default().with_particles(10), &mut rng).unwrap();
    mesh.rebuild(25, &mut rng);
    assert_eq!(mesh.geometry().particle_count(), 25);
    assert_eq!(mesh.uniforms().num_vertices, 25.0);
    assert_eq!(mesh.evaluate().len(), 75);

    mesh.rebuild(0, &mut rng);
    assert!(mesh.geometry().is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = VisualConfig::for_variant(Variant::Triangles).with_particles(10);
    config.blend.frame_interval = 0.0;
    match ParticleMesh::new(&config) {
        Err(Error::Config(ConfigError::InvalidFrameInterval(v))) => assert_eq!(v, 0.0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("zero frame interval should be rejected"),
    }
}
