#![forbid(unsafe_code)]

//! Crop-centre picker geometry.
//!
//! A result page shows each photo scaled to fit, with a marker on the crop
//! centre. Clicking the photo moves the centre. The centre is stored in the
//! image's natural pixels, while clicks and the marker live in displayed
//! pixels; [`ImageMetrics`] converts between the two.
//!
//! After a click the host posts the new centre as JSON to
//! [`centre_endpoint`] and swaps in the re-cropped image it gets back.
//! [`CentrePick`] bundles what a click produces: the stored centre, where
//! the marker goes, and the request to send.

use serde::{Deserialize, Serialize};
use tilegrid_core::geometry::{Point, Size};

/// Errors from centre conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentreError {
    /// The image has not loaded (natural size is zero or invalid).
    NaturalSizeUnknown,
    /// The image is not laid out (displayed size is zero or invalid).
    NotDisplayed,
}

impl core::fmt::Display for CentreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NaturalSizeUnknown => write!(f, "image natural size is unknown"),
            Self::NotDisplayed => write!(f, "image has no displayed size"),
        }
    }
}

impl std::error::Error for CentreError {}

/// A crop centre in natural image pixels; also the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Centre {
    pub x: i64,
    pub y: i64,
}

impl Centre {
    /// Create a centre.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// JSON request body, `{"x":..,"y":..}`.
    pub fn to_json_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The centre as a natural-pixel point.
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Path of the centre-update endpoint for `image_id`.
pub fn centre_endpoint(image_id: &str) -> String {
    format!("/api/result/centre/{image_id}")
}

/// Read a centre stored in `data-centre-x` / `data-centre-y` attributes.
///
/// Values are parsed like `parseFloat`, so stored fractional centres are
/// kept as-is for marker placement.
pub fn centre_from_dataset(x: &str, y: &str) -> Option<Point> {
    Some(Point::new(
        crate::css::parse_css_px(x)?,
        crate::css::parse_css_px(y)?,
    ))
}

/// Where an image sits on the page and how much it is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    /// Intrinsic size of the image file.
    pub natural: Size,
    /// Rendered size (bounding client rect).
    pub displayed: Size,
    /// Image offset inside its positioned parent, where the marker lives.
    pub offset: Point,
}

impl ImageMetrics {
    /// Create metrics.
    pub const fn new(natural: Size, displayed: Size, offset: Point) -> Self {
        Self {
            natural,
            displayed,
            offset,
        }
    }

    fn check(&self) -> Result<(), CentreError> {
        if self.natural.sanitized().is_empty() {
            return Err(CentreError::NaturalSizeUnknown);
        }
        if self.displayed.sanitized().is_empty() {
            return Err(CentreError::NotDisplayed);
        }
        Ok(())
    }

    /// Convert a click, relative to the displayed image's top-left corner,
    /// to natural pixels. Rounds half up, like `Math.round`.
    pub fn natural_from_click(&self, click: Point) -> Result<Centre, CentreError> {
        self.check()?;
        let natural = click.scale(
            self.natural.width / self.displayed.width,
            self.natural.height / self.displayed.height,
        );
        Ok(Centre::new(round_half_up(natural.x), round_half_up(natural.y)))
    }

    /// Marker position for a natural-pixel centre, in the parent's
    /// coordinates.
    pub fn marker_position(&self, centre: Point) -> Result<Point, CentreError> {
        self.check()?;
        let scaled = centre.scale(
            self.displayed.width / self.natural.width,
            self.displayed.height / self.natural.height,
        );
        Ok(scaled.offset_by(self.offset))
    }
}

/// `Math.round`: ties go towards positive infinity.
/// Everything a click on an image produces.
#[derive(Debug, Clone, PartialEq)]
pub struct CentrePick {
    /// New centre in natural pixels, for `data-centre-x` / `data-centre-y`.
    pub centre: Centre,
    /// Marker position in the parent's coordinates.
    pub marker: Point,
    /// Path to POST the centre to.
    pub endpoint: String,
    /// JSON request body.
    pub body: String,
}

/// Errors from [`pick_centre`].
#[derive(Debug)]
pub enum PickError {
    /// The image cannot be measured yet.
    Centre(CentreError),
    /// The request body could not be encoded.
    Encode(serde_json::Error),
}

impl core::fmt::Display for PickError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Centre(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode centre: {err}"),
        }
    }
}

impl std::error::Error for PickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Centre(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<CentreError> for PickError {
    fn from(err: CentreError) -> Self {
        Self::Centre(err)
    }
}

impl From<serde_json::Error> for PickError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Handle a click on image `image_id`.
pub fn pick_centre(
    metrics: &ImageMetrics,
    image_id: &str,
    click: Point,
) -> Result<CentrePick, PickError> {
    let centre = metrics.natural_from_click(click)?;
    let marker = metrics.marker_position(centre.to_point())?;
    Ok(CentrePick {
        centre,
        marker,
        endpoint: centre_endpoint(image_id),
        body: centre.to_json_body()?,
    })
}

#[inline]
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // `as` saturates; NaN becomes 0.
    rounded as i64
}
