use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, ContourSet, Extent, ImagePlot};

static NEXT_FIGURE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one figure.
///
/// Ids are process-unique so handles issued by one figure are never mistaken
/// for handles of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FigureId(u32);

impl FigureId {
    pub(crate) fn next() -> Self {
        Self(NEXT_FIGURE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle to one axes region inside a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisId {
    figure: FigureId,
    index: u32,
}

impl AxisId {
    pub(crate) const fn new(figure: FigureId, index: u32) -> Self {
        Self { figure, index }
    }

    #[must_use]
    pub const fn figure(self) -> FigureId {
        self.figure
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }
}

/// Handle to one colorbar inside a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorbarId {
    figure: FigureId,
    index: u32,
}

impl ColorbarId {
    pub(crate) const fn new(figure: FigureId, index: u32) -> Self {
        Self { figure, index }
    }

    #[must_use]
    pub const fn figure(self) -> FigureId {
        self.figure
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }
}

/// Anything that designates a drawable axes region of a figure.
pub trait DrawableAxis {
    fn axis_id(&self) -> AxisId;

    fn figure_id(&self) -> FigureId {
        self.axis_id().figure()
    }
}

impl DrawableAxis for AxisId {
    fn axis_id(&self) -> AxisId {
        *self
    }
}

impl DrawableAxis for Axes {
    fn axis_id(&self) -> AxisId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxesRole {
    /// Generic plotting region.
    Plot,
    /// Region hosting a colorbar.
    Colorbar(ColorbarId),
}

/// One rectangular drawing region of a figure.
#[derive(Debug, Clone)]
pub struct Axes {
    id: AxisId,
    pub(crate) position: Bounds,
    pub(crate) original_position: Bounds,
    pub(crate) role: AxesRole,
    pub(crate) images: Vec<ImagePlot>,
    pub(crate) contours: Vec<ContourSet>,
}

impl Axes {
    pub(crate) fn new(id: AxisId, position: Bounds) -> Self {
        Self {
            id,
            position,
            original_position: position,
            role: AxesRole::Plot,
            images: Vec::new(),
            contours: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Active position, after any divider relayout.
    #[must_use]
    pub fn position(&self) -> Bounds {
        self.position
    }

    /// Position the axes was created with.
    #[must_use]
    pub fn original_position(&self) -> Bounds {
        self.original_position
    }

    #[must_use]
    pub fn role(&self) -> AxesRole {
        self.role
    }

    #[must_use]
    pub fn images(&self) -> &[ImagePlot] {
        &self.images
    }

    #[must_use]
    pub fn contours(&self) -> &[ContourSet] {
        &self.contours
    }

    /// Data limits covering every displayed artist.
    #[must_use]
    pub fn data_limits(&self) -> Option<Extent> {
        self.images
            .iter()
            .map(ImagePlot::extent)
            .chain(self.contours.iter().map(ContourSet::extent))
            .reduce(Extent::union)
    }
}
