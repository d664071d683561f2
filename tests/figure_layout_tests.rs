use approx::assert_relative_eq;
use chart_colorbar::core::{
    AppendSide, AxesSize, Bounds, Colormap, Extent, Figure, FigureConfig, ImagePlot,
    SubplotMargins, ValueGrid,
};

#[test]
fn custom_config_moves_subplot_box() {
    let config = FigureConfig::default()
        .with_size_inches(8.0, 4.0)
        .with_dpi(50.0)
        .with_subplot_margins(SubplotMargins {
            left: 0.1,
            right: 0.8,
            bottom: 0.2,
            top: 0.9,
        });
    let mut figure = Figure::new(config).expect("figure");
    let axis = figure.add_subplot();

    let position = figure.axes(axis).expect("axes").position();
    assert_relative_eq!(position.left, 0.1);
    assert_relative_eq!(position.right(), 0.8);
    assert_eq!(figure.viewport().width, 400);
    assert_eq!(figure.viewport().height, 200);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(Figure::new(FigureConfig::default().with_dpi(0.0)).is_err());
    assert!(Figure::new(FigureConfig::default().with_size_inches(f64::NAN, 2.0)).is_err());
    let inverted = SubplotMargins {
        left: 0.9,
        right: 0.1,
        bottom: 0.1,
        top: 0.9,
    };
    assert!(Figure::new(FigureConfig::default().with_subplot_margins(inverted)).is_err());
}

#[test]
fn appending_on_every_side_keeps_siblings_aligned() {
    let mut figure = Figure::new(FigureConfig::default()).expect("figure");
    let parent = figure.add_subplot();
    let pad = AxesSize::Fixed(0.1);

    let right = figure
        .append_child_axis(parent, AppendSide::Right, AxesSize::percent(5.0), pad)
        .expect("right");
    let top = figure
        .append_child_axis(parent, AppendSide::Top, AxesSize::Fixed(0.3), pad)
        .expect("top");
    let left = figure
        .append_child_axis(parent, AppendSide::Left, AxesSize::percent(10.0), pad)
        .expect("left");
    let bottom = figure
        .append_child_axis(parent, AppendSide::Bottom, AxesSize::Fixed(0.2), pad)
        .expect("bottom");

    let main = figure.axes(parent).expect("parent").position();
    let origin = figure.axes(parent).expect("parent").original_position();
    let right = figure.axes(right).expect("right").position();
    let top = figure.axes(top).expect("top").position();
    let left = figure.axes(left).expect("left").position();
    let bottom = figure.axes(bottom).expect("bottom").position();

    for side in [right, left] {
        assert_relative_eq!(side.bottom, main.bottom, epsilon = 1e-12);
        assert_relative_eq!(side.height, main.height, epsilon = 1e-12);
    }
    for side in [top, bottom] {
        assert_relative_eq!(side.left, main.left, epsilon = 1e-12);
        assert_relative_eq!(side.width, main.width, epsilon = 1e-12);
    }

    assert_relative_eq!(left.left, origin.left, epsilon = 1e-12);
    assert_relative_eq!(right.right(), origin.right(), epsilon = 1e-12);
    assert_relative_eq!(bottom.bottom, origin.bottom, epsilon = 1e-12);
    assert_relative_eq!(top.top(), origin.top(), epsilon = 1e-12);
    assert_relative_eq!(right.width, main.width * 0.05, epsilon = 1e-12);
    assert_relative_eq!(left.width, main.width * 0.10, epsilon = 1e-12);

    let divider = figure.divider(parent).expect("divider");
    assert_eq!(divider.appended().len(), 4);
    assert_eq!(divider.origin(), origin);
}

#[test]
fn string_sizes_drive_appends() {
    let mut figure = Figure::new(FigureConfig::default()).expect("figure");
    let parent = figure.add_axes(Bounds::new(0.1, 0.1, 0.5, 0.5)).expect("axes");
    let size: AxesSize = "20%".parse().expect("size");
    let pad: AxesSize = "0.25".parse().expect("pad");

    let child = figure
        .append_child_axis(parent, AppendSide::Right, size, pad)
        .expect("append");
    let (width_in, _) = figure.config().size_inches();
    let main = figure.axes(parent).expect("parent").position();
    let child = figure.axes(child).expect("child").position();
    assert_relative_eq!(child.width, main.width * 0.2, epsilon = 1e-12);
    assert_relative_eq!((child.left - main.right()) * width_in, 0.25, epsilon = 1e-12);
}

#[test]
fn infeasible_append_keeps_previous_layout() {
    let mut figure = Figure::new(FigureConfig::default()).expect("figure");
    let parent = figure.add_subplot();
    let first = figure
        .append_child_axis(parent, AppendSide::Right, AxesSize::percent(5.0), AxesSize::Fixed(0.05))
        .expect("first");
    let before = figure.snapshot();

    let result = figure.append_child_axis(
        parent,
        AppendSide::Left,
        AxesSize::Fixed(100.0),
        AxesSize::Fixed(0.0),
    );
    assert!(result.is_err());
    assert_eq!(figure.snapshot(), before);
    assert!(figure.contains_axis(first));
}

#[test]
fn images_share_limits_across_extents() {
    let mut figure = Figure::new(FigureConfig::default()).expect("figure");
    let axis = figure.add_subplot();
    let grid = ValueGrid::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).expect("grid");
    let wide = ImagePlot::new(axis, grid.clone(), Colormap::Gray)
        .with_extent(Extent::new(0.0, 10.0, 0.0, 5.0))
        .expect("extent");
    figure.add_image(wide).expect("image");
    figure.imshow(axis, grid, Colormap::Gray).expect("image");

    let limits = figure.axes(axis).expect("axes").data_limits().expect("limits");
    assert_eq!(limits, Extent::new(-0.5, 10.0, -0.5, 5.0));
    assert_eq!(figure.axes(axis).expect("axes").images().len(), 2);
}
