//! Mask compositing and full-frame benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use showcase_overlay::text::wrap_text;
use showcase_overlay::{
    InstantAnimations, MaskCompositor, MemoryShotStore, NewShowcaseDrawer, OverlayConfig,
    OverlayController, PixelBuffer, Rgba, ShowcasePoint, StandardShowcaseDrawer,
};
use std::hint::black_box;

fn mask_erase(c: &mut Criterion) {
    let mut compositor = MaskCompositor::new(Box::new(StandardShowcaseDrawer::new()));
    compositor.ensure_buffer(1080, 1920);

    c.bench_function("mask_erase_1080x1920", |b| b.iter(|| compositor.erase()));
}

fn mask_holes(c: &mut Criterion) {
    let mut compositor = MaskCompositor::new(Box::new(NewShowcaseDrawer::new()));
    compositor.set_colours(Rgba::RED, Rgba::from_argb(128, 80, 80, 80));
    compositor.ensure_buffer(1080, 1920);
    let mut surface = PixelBuffer::filled(1080, 1920, Rgba::WHITE);

    c.bench_function("mask_one_hole_and_blit", |b| {
        b.iter(|| {
            compositor.erase();
            compositor.draw_showcase(black_box(540.0), black_box(960.0), 1.0);
            compositor.draw_to_canvas(&mut surface, 1.0);
        })
    });

    c.bench_function("mask_four_holes_and_blit", |b| {
        b.iter(|| {
            compositor.erase();
            for (x, y) in [(200.0, 300.0), (800.0, 300.0), (200.0, 1500.0), (800.0, 1500.0)] {
                compositor.draw_showcase(black_box(x), black_box(y), 1.0);
            }
            compositor.draw_to_canvas(&mut surface, 1.0);
        })
    });
}

fn overlay_frame(c: &mut Criterion) {
    let mut overlay = OverlayController::new(
        OverlayConfig::default(),
        Box::new(StandardShowcaseDrawer::new()),
        Box::new(InstantAnimations),
        Box::new(MemoryShotStore::new()),
    )
    .expect("valid config");
    overlay.on_global_layout(1080, 1920);
    overlay.set_content_title("Search");
    overlay.set_content_text("Tap here to look for anything in your library.");
    for p in [(900, 150), (150, 1700), (540, 1700)] {
        overlay.set_showcase_position(ShowcasePoint::new(p.0, p.1));
    }
    overlay.show();
    let mut surface = PixelBuffer::new(1080, 1920);

    c.bench_function("overlay_draw_three_targets", |b| {
        b.iter(|| black_box(overlay.draw(&mut surface)))
    });
}

fn text_wrap(c: &mut Criterion) {
    let detail = "Showcase overlays explain one control at a time. ".repeat(8);

    c.bench_function("wrap_text_paragraph", |b| {
        b.iter(|| wrap_text(black_box(&detail), black_box(480.0), 9.0))
    });
}

criterion_group!(benches, mask_erase, mask_holes, overlay_frame, text_wrap);
criterion_main!(benches);
