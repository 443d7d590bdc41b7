// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use proteus::format::parse_model;
use proteus::layout::{build_request, layered, reconcile};
use proteus::render::build_scene;

mod fixtures;

// Benchmark identity (keep stable): groups `layout.solve` and
// `render.reconcile_scene`, case ids `medium` / `large_chains`.
fn benches_render(c: &mut Criterion) {
    let cases =
        [("medium", fixtures::document(60, 3)), ("large_chains", fixtures::document(300, 8))];

    {
        let mut group = c.benchmark_group("layout.solve");
        for (case_id, doc) in &cases {
            let model = parse_model(doc).expect("parse_model");
            let request = build_request(&model);
            group.throughput(Throughput::Elements(model.edges().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| layered::solve(black_box(&request)).expect("solve"))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("render.reconcile_scene");
        for (case_id, doc) in &cases {
            let model = parse_model(doc).expect("parse_model");
            let request = build_request(&model);
            let response = layered::solve(&request).expect("solve");
            group.throughput(Throughput::Elements(model.edges().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| {
                    let reconciled = reconcile(black_box(&response)).expect("reconcile");
                    black_box(build_scene(&model, &reconciled).edges.len())
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_render);
criterion_main!(benches);
