use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mate_core::{
    AffordanceDescriptor, AgentPose, EntityId, EntityQuery, TickContext, Vec3, WorldEntity,
    WorldView,
};
use mate_perception::{PerceptionConfig, PerceptionEncoder};

struct BenchWorld {
    agent: Vec3,
    entities: Vec<WorldEntity>,
}

impl WorldView for BenchWorld {
    type Agent = u32;
}

impl AgentPose for BenchWorld {
    fn position(&self, _agent: u32) -> Option<Vec3> {
        Some(self.agent)
    }

    fn yaw(&self, _agent: u32) -> Option<f32> {
        Some(0.3)
    }
}

impl EntityQuery for BenchWorld {
    fn entity(&self, id: EntityId) -> Option<WorldEntity> {
        self.entities.iter().find(|e| e.id == id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<WorldEntity> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn nearby(&self, origin: Vec3, radius: f32) -> Vec<WorldEntity> {
        let mut out: Vec<WorldEntity> = self
            .entities
            .iter()
            .filter(|e| e.position.distance(origin) <= radius)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.position
                .distance(origin)
                .total_cmp(&b.position.distance(origin))
                .then(a.id.cmp(&b.id))
        });
        out
    }
}

fn world(count: u64) -> BenchWorld {
    let mut entities = vec![WorldEntity::new(0, "Player", Vec3::new(1.0, 0.0, 4.0))];
    for i in 1..=count {
        let angle = i as f32 * 0.7;
        let radius = 2.0 + (i % 20) as f32;
        let mut descriptor = AffordanceDescriptor::named(format!("obj{i}"));
        descriptor.provides_cover = i % 3 == 0;
        descriptor.is_threat = i % 11 == 0;
        entities.push(
            WorldEntity::new(i, format!("obj{i}"), Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius))
                .with_descriptor(descriptor),
        );
    }
    BenchWorld {
        agent: Vec3::ZERO,
        entities,
    }
}

fn bench_encoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("mate-perception/encoder");

    for &count in &[16u64, 128, 1024] {
        let mut bench_world = world(count);

        group.bench_with_input(BenchmarkId::new("observe_render", count), &count, |b, _| {
            let encoder = PerceptionEncoder::default();
            b.iter(|| {
                let snapshot = encoder.observe(0, 0, &bench_world).expect("pose");
                black_box(snapshot.render());
            })
        });

        group.bench_with_input(BenchmarkId::new("tick", count), &count, |b, _| {
            let mut encoder = PerceptionEncoder::new(PerceptionConfig {
                sample_interval: 0.0,
                ..PerceptionConfig::default()
            });
            let mut tick = 0u64;
            b.iter(|| {
                tick += 1;
                bench_world.agent.x = (tick % 8) as f32;
                black_box(encoder.tick(&TickContext::new(tick, 0.05), 0, &bench_world));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encoder);
criterion_main!(benches);
