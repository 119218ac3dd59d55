// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dropzone::event::{DragEvent, DragPhase};
use understory_dropzone::registry::active_drops;
use understory_dropzone::resolve::{Draggable, get_drop, index_of_deepest};
use understory_dropzone::scope::{DropTarget, DropzoneOptions, Scope};
use understory_dropzone::state::DropState;
use understory_pointer::{ElementArena, ElementId, ElementSpec, PointerEvent};

/// A grid of `n * n` cells, each holding a nested inner cell, plus a draggable.
fn gen_grid_scope(n: usize, cell: f64) -> (Scope<ElementId, ElementArena>, ElementId) {
    let mut tree = ElementArena::new();
    let body = tree.insert(None, ElementSpec::tag("body"));
    let mut cells = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let outer = tree.insert(
                Some(body),
                ElementSpec::tag("div")
                    .class("cell")
                    .rect(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
            tree.insert(
                Some(outer),
                ElementSpec::tag("div").class("inner").rect(Rect::new(
                    x0 + cell * 0.25,
                    y0 + cell * 0.25,
                    x0 + cell * 0.75,
                    y0 + cell * 0.75,
                )),
            );
            cells.push(outer);
        }
    }
    let card = tree.insert(Some(body), ElementSpec::tag("div").class("card"));
    let mut scope = Scope::new(tree);
    let outer = scope.add_dropzone(DropTarget::Elements(cells), None);
    scope.configure(outer, DropzoneOptions::new());
    let inner = scope.add_dropzone(DropTarget::Selector(".inner".into()), None);
    scope.configure(inner, DropzoneOptions::new());
    (scope, card)
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");
    for &n in &[8_usize, 16, 32] {
        let (scope, card) = gen_grid_scope(n, 20.0);
        group.throughput(Throughput::Elements((2 * n * n) as u64));
        group.bench_function(format!("active_drops_n{}", n), |b| {
            b.iter(|| black_box(active_drops(&scope, card).len()));
        });
    }
    group.finish();
}

fn bench_get_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_drop");
    for &n in &[8_usize, 16, 32] {
        let (scope, card) = gen_grid_scope(n, 20.0);
        let active = active_drops(&scope, card);
        let draggable = Draggable::new(card);
        let extent = n as f64 * 20.0;
        let mut rng = Rng::new(0x5eed);
        group.throughput(Throughput::Elements(active.len() as u64));
        group.bench_function(format!("random_pointer_n{}", n), |b| {
            b.iter_batched(
                || Point::new(rng.next_f64() * extent, rng.next_f64() * extent),
                |at| {
                    let drag = DragEvent::new(DragPhase::Move, at, 0.0, card);
                    let pointer = PointerEvent::at(0, at, 0.0, None);
                    black_box(get_drop(&scope, &active, &drag, &pointer, &draggable));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_deepest(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_of_deepest");
    for &depth in &[4_usize, 16, 64] {
        let mut tree = ElementArena::new();
        let mut parent = tree.insert(None, ElementSpec::tag("body"));
        let mut chain = Vec::with_capacity(depth);
        for _ in 0..depth {
            parent = tree.insert(Some(parent), ElementSpec::tag("div"));
            chain.push(Some(parent));
        }
        chain.reverse();
        group.bench_function(format!("reversed_chain_d{}", depth), |b| {
            b.iter(|| black_box(index_of_deepest(&tree, &chain)));
        });
    }
    group.finish();
}

fn bench_drag_frame(c: &mut Criterion) {
    let (mut scope, card) = gen_grid_scope(16, 20.0);
    let draggable = Draggable::new(card);
    c.bench_function("drag_frame_sweep_n16", |b| {
        b.iter(|| {
            let mut state = DropState::new();
            let mut start = DragEvent::new(DragPhase::Start, Point::ZERO, 0.0, card);
            state.start(&mut scope, &draggable, &mut start);
            for i in 0..32 {
                let at = Point::new(f64::from(i) * 10.0, f64::from(i) * 10.0);
                let t = f64::from(i) * 16.0;
                let mut drag = DragEvent::new(DragPhase::Move, at, t, card);
                state.update(&scope, &draggable, &mut drag, &PointerEvent::at(0, at, t, None));
                state.fire(&mut scope);
            }
            black_box(state.cur());
        });
    });
}

criterion_group!(benches, bench_collect, bench_get_drop, bench_deepest, bench_drag_frame);
criterion_main!(benches);
