use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::banner::repo::InMemoryBannerRepository;
use service::banner::{ActiveBannerReader, BannerPatch, BannerService, BannerStatus, NewBanner};

fn bench_promotion(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = Arc::new(BannerService::new(Arc::new(InMemoryBannerRepository::new())));

    // seed outside of the measured loop
    let ids: Vec<_> = rt.block_on(async {
        let mut ids = Vec::new();
        for i in 0..64 {
            let b = svc.create(NewBanner::new(format!("banner-{i}"), "img.png", "/sale")).await.unwrap();
            ids.push(b.id);
        }
        ids
    });

    let mut next = 0usize;
    c.bench_function("banner_promote_demote_others", |b| {
        b.iter(|| {
            let id = ids[next % ids.len()];
            next += 1;
            rt.block_on(svc.update(id, BannerPatch::status(BannerStatus::Active))).unwrap();
        });
    });

    let reader = ActiveBannerReader::new(Arc::clone(&svc));
    c.bench_function("banner_active_read", |b| {
        b.iter(|| rt.block_on(reader.read()));
    });
}

criterion_group!(benches, bench_promotion);
criterion_main!(benches);
