use chart_colorbar::api::{FigureEngine, FigureRenderStyle, build_figure_render_frame};
use chart_colorbar::attach_colorbar;
use chart_colorbar::core::{
    AppendSide, AxesSize, Colormap, Extent, Figure, FigureConfig, Normalize, ScalarMappable,
    ValueGrid, project_grid_cells,
};
use chart_colorbar::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn ramp(size: usize) -> ValueGrid {
    ValueGrid::from_fn(size, size, |row, col| (row + col) as f64).expect("valid ramp")
}

fn bench_attach_colorbar(c: &mut Criterion) {
    let mut base = Figure::new(FigureConfig::default()).expect("figure");
    let axis = base.add_subplot();
    let image = base.imshow(axis, ramp(100), Colormap::Jet).expect("image");

    c.bench_function("attach_colorbar_100x100", |b| {
        b.iter(|| {
            let mut figure = base.clone();
            let _ = attach_colorbar(&mut figure, black_box(&image), &axis)
                .expect("attach should succeed");
        })
    });
}

fn bench_divider_layout_stack(c: &mut Criterion) {
    let mut figure = Figure::new(FigureConfig::default()).expect("figure");
    let parent = figure.add_subplot();
    for side in [AppendSide::Right, AppendSide::Right, AppendSide::Top, AppendSide::Left] {
        figure
            .append_child_axis(parent, side, AxesSize::percent(5.0), AxesSize::Fixed(0.05))
            .expect("append");
    }
    let divider = figure.divider(parent).expect("divider").clone();
    let size_in = figure.config().size_inches();

    c.bench_function("divider_layout_4_appended", |b| {
        b.iter(|| {
            let _ = divider
                .layout(black_box(size_in))
                .expect("layout should succeed");
        })
    });
}

fn bench_grid_projection_200x200(c: &mut Criterion) {
    let grid = ramp(200);
    let extent = Extent::for_grid(200, 200);
    let scale = ScalarMappable::new(Normalize::new(0.0, 398.0).expect("norm"), Colormap::Viridis);

    c.bench_function("grid_projection_200x200", |b| {
        b.iter(|| {
            let _ = project_grid_cells(
                black_box(&grid),
                extent,
                &scale,
                extent,
                (80.0, 57.6, 496.0, 369.6),
            )
            .expect("projection should succeed");
        })
    });
}

fn bench_render_frame_with_colorbar(c: &mut Criterion) {
    let mut engine =
        FigureEngine::new(NullRenderer::default(), FigureConfig::default()).expect("engine");
    let figure = engine.figure_mut();
    let axis = figure.add_subplot();
    let image = figure.imshow(axis, ramp(100), Colormap::Jet).expect("image");
    attach_colorbar(figure, &image, &axis).expect("colorbar");

    c.bench_function("render_frame_100x100_with_colorbar", |b| {
        b.iter(|| {
            let _ = build_figure_render_frame(
                black_box(engine.figure()),
                FigureRenderStyle::default(),
            )
            .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_attach_colorbar,
    bench_divider_layout_stack,
    bench_grid_projection_200x200,
    bench_render_frame_with_colorbar
);
criterion_main!(benches);
