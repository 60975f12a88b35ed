use glyphfield_core::geometry::{GeometryBuilder, ParticleTemplate, SeedRange, ATTRIBUTE_LAYOUTS};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_single_particle_layout() {
    let mut rng = StdRng::seed_from_u64(42);
    let g = GeometryBuilder::new(ParticleTemplate::FixedTriangle, SeedRange::Unit)
        .build_with_rng(1, &mut rng);

    assert_eq!(g.positions.len(), 9);
    assert_eq!(g.random_seeds.len(), 9);
    assert_eq!(g.random_seeds[0..3], g.random_seeds[3..6]);
    assert_eq!(g.random_seeds[0..3], g.random_seeds[6..9]);
    assert_eq!(g.ring_indices, vec![0.0, 0.0, 0.0]);
    assert_eq!(g.vertex_indices, vec![0, 1, 2]);
    assert_eq!(g.indices, vec![0, 1, 2]);
    assert_eq!(
        g.positions,
        vec![1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn test_zero_particles_empty() {
    let g = GeometryBuilder::default().build(0);
    assert!(g.is_empty());
    assert!(g.positions.is_empty());
    assert!(g.random_seeds.is_empty());
    assert!(g.vertex_indices.is_empty());
    assert!(g.ring_indices.is_empty());
    assert!(g.normals.is_empty());
    assert!(g.uvs.is_empty());
    assert!(g.indices.is_empty());
    assert_eq!(g.particle_count(), 0);
}

#[test]
fn test_negative_count_is_empty() {
    let g = GeometryBuilder::default().build_signed(-5);
    assert!(g.is_empty());
    assert!(g.indices.is_empty());
}

#[test]
fn test_cardinality_invariants() {
    let mut rng = StdRng::seed_from_u64(1);
    for template in [
        ParticleTemplate::FixedTriangle,
        ParticleTemplate::JitteredTriangle,
        ParticleTemplate::Quad { half_size: 2.0 },
    ] {
        for n in [0usize, 1, 2, 17, 300] {
            let g = GeometryBuilder::new(template, SeedRange::Signed).build_with_rng(n, &mut rng);
            let per = template.vertices_per_particle();
            assert_eq!(g.vertex_count(), per * n, "{template:?} n={n}");
            assert_eq!(g.positions.len() / 3, g.vertex_count());
            assert_eq!(g.random_seeds.len() / 3, g.vertex_count());
            assert_eq!(g.ring_indices.len(), g.vertex_count());
            assert_eq!(g.normals.len() / 3, g.vertex_count());
            assert_eq!(g.uvs.len() / 2, g.vertex_count());
            assert_eq!(g.indices.len(), n * template.indices_per_particle());
            assert_eq!(g.particle_count(), n);
        }
    }
}

#[test]
fn test_triangle_layout_three_vertices_per_particle() {
    let mut rng = StdRng::seed_from_u64(9);
    let n = 250;
    let g = GeometryBuilder::default().build_with_rng(n, &mut rng);
    assert_eq!(g.vertex_indices.len(), 3 * n);
    assert_eq!(g.triangle_count(), n);
    for (i, tri) in g.indices.chunks_exact(3).enumerate() {
        let base = 3 * i as u32;
        assert_eq!(tri, [base, base + 1, base + 2]);
    }
}

#[test]
fn test_particle_vertices_share_seed_and_ring() {
    let mut rng = StdRng::seed_from_u64(5);
    let g = GeometryBuilder::new(ParticleTemplate::JitteredTriangle, SeedRange::Signed)
        .build_with_rng(100, &mut rng);
    for i in 0..100 {
        let a = g.vertex(3 * i).unwrap();
        let b = g.vertex(3 * i + 1).unwrap();
        let c = g.vertex(3 * i + 2).unwrap();
        assert_eq!(a.random_seed, b.random_seed, "particle {i}");
        assert_eq!(a.random_seed, c.random_seed, "particle {i}");
        assert_eq!(a.ring_index, i as f32);
        assert_eq!(b.ring_index, i as f32);
        assert_eq!(c.ring_index, i as f32);
    }
}

#[test]
fn test_vertex_indices_sequential() {
    let mut rng = StdRng::seed_from_u64(6);
    let g = GeometryBuilder::default().build_with_rng(64, &mut rng);
    let expected: Vec<u32> = (0..192).collect();
    assert_eq!(g.vertex_indices, expected);
}

#[test]
fn test_seed_ranges() {
    let mut rng = StdRng::seed_from_u64(11);
    let unit = GeometryBuilder::new(ParticleTemplate::FixedTriangle, SeedRange::Unit)
        .build_with_rng(500, &mut rng);
    assert!(unit.random_seeds.iter().all(|r| (0.0..1.0).contains(r)));

    let signed = GeometryBuilder::new(ParticleTemplate::FixedTriangle, SeedRange::Signed)
        .build_with_rng(500, &mut rng);
    assert!(signed.random_seeds.iter().all(|r| (-1.0..1.0).contains(r)));
    assert!(
        signed.random_seeds.iter().any(|r| *r < 0.0),
        "signed seeds should reach below zero"
    );
}

#[test]
fn test_seeded_builds_repeat_and_unseeded_differ() {
    let builder = GeometryBuilder::default();
    let a = builder.build_with_rng(20, &mut StdRng::seed_from_u64(3));
    let b = builder.build_with_rng(20, &mut StdRng::seed_from_u64(3));
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.random_seeds, b.random_seeds);

    let c = builder.build(20);
    let d = builder.build(20);
    assert_eq!(c.vertex_indices, d.vertex_indices, "structure is identical");
    assert_ne!(c.random_seeds, d.random_seeds, "contents are random");
}

#[test]
fn test_normals_unit_length() {
    let mut rng = StdRng::seed_from_u64(8);
    let g = GeometryBuilder::default().build_with_rng(40, &mut rng);
    for v in g.vertices() {
        assert!((v.normal.length() - 1.0).abs() < 1e-4, "normal {:?}", v.normal);
    }
}

#[test]
fn test_attribute_layouts_cover_channels() {
    let names: Vec<&str> = ATTRIBUTE_LAYOUTS.iter().map(|a| a.name).collect();
    assert_eq!(
        names,
        vec!["position", "randomSeed", "vertexIndex", "ringIndex", "normal", "uv"]
    );
}
