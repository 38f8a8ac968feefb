//! Axis-aligned boxes in XYXY order.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::{Normalized, Pixel};

/// An axis-aligned box `(xmin, ymin, xmax, ymax)`.
///
/// x grows to the right and y grows downward. The `TSpace` marker is
/// [`Pixel`] or [`Normalized`] and keeps the two coordinate frames apart.
///
/// Construction never checks `min <= max`. Reversed boxes are representable
/// so that the overlap metric can treat them leniently (see
/// [`abs_area`](Self::abs_area)) and validation can report them.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            _space: PhantomData,
        }
    }

    /// Builds a box from a top-left corner plus width and height.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Coordinates as `[xmin, ymin, xmax, ymax]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    /// Negative when `xmax < xmin`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Negative when `ymax < ymin`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Signed area. Negative when exactly one axis is reversed.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Area as used by the overlap metric: `|width * height|`.
    ///
    /// A box with reversed min/max coordinates still gets a positive area
    /// here instead of being rejected.
    #[inline]
    pub fn abs_area(&self) -> f64 {
        self.area().abs()
    }

    /// Area of the rectangle shared with `other`, zero when they do not meet.
    #[inline]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let x_a = self.xmin.max(other.xmin);
        let y_a = self.ymin.max(other.ymin);
        let x_b = self.xmax.min(other.xmax);
        let y_b = self.ymax.min(other.ymax);

        ((x_b - x_a).max(0.0) * (y_b - y_a).max(0.0)).abs()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// True when `xmin <= xmax` and `ymin <= ymax`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// True when the box covers no area (a point or a line).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }
}

impl BBoxXYXY<Pixel> {
    /// Divides the coordinates by the image size.
    pub fn to_normalized(&self, image_width: f64, image_height: f64) -> BBoxXYXY<Normalized> {
        BBoxXYXY::from_xyxy(
            self.xmin / image_width,
            self.ymin / image_height,
            self.xmax / image_width,
            self.ymax / image_height,
        )
    }
}

impl BBoxXYXY<Normalized> {
    /// Scales normalized coordinates back up to the image size.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(
            self.xmin * image_width,
            self.ymin * image_height,
            self.xmax * image_width,
            self.ymax * image_height,
        )
    }
}

impl<TSpace> From<[f64; 4]> for BBoxXYXY<TSpace> {
    fn from(c: [f64; 4]) -> Self {
        Self::from_xyxy(c[0], c[1], c[2], c[3])
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.xmin)
            .field("ymin", &self.ymin)
            .field("xmax", &self.xmax)
            .field("ymax", &self.ymax)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Manual serde so TSpace needs no Serialize/Deserialize bounds.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBoxXYXY", 4)?;
        state.serialize_field("xmin", &self.xmin)?;
        state.serialize_field("ymin", &self.ymin)?;
        state.serialize_field("xmax", &self.xmax)?;
        state.serialize_field("ymax", &self.ymax)?;
        state.end()
    }
}

/// Accepts either `{"xmin": .., "ymin": .., "xmax": .., "ymax": ..}` or a
/// bare `[xmin, ymin, xmax, ymax]` array, the layout detectors emit.
impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Named {
            xmin: f64,
            ymin: f64,
            xmax: f64,
            ymax: f64,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Named(Named),
            Array([f64; 4]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Named(n) => Ok(Self::from_xyxy(n.xmin, n.ymin, n.xmax, n.ymax)),
            Repr::Array(c) => Ok(Self::from(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_area() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.width(), 90.0);
        assert_eq!(bbox.height(), 60.0);
        assert_eq!(bbox.area(), 5400.0);
        assert_eq!(bbox.abs_area(), 5400.0);
    }

    #[test]
    fn reversed_box_has_positive_abs_area() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 0.0, 0.0, 10.0);
        assert!(!bbox.is_ordered());
        assert_eq!(bbox.area(), -100.0);
        assert_eq!(bbox.abs_area(), 100.0);
    }

    #[test]
    fn from_xywh_matches_xyxy() {
        let a: BBoxXYXY<Pixel> = BBoxXYXY::from_xywh(15.0, 25.0, 50.0, 30.0);
        let b: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(15.0, 25.0, 65.0, 55.0);
        assert_eq!(a, b);
    }

    #[test]
    fn intersection_of_disjoint_boxes_is_zero() {
        let a: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0);
        let b: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn intersection_of_overlapping_boxes() {
        let a: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0);
        let b: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersection_area(&b), 25.0);
        assert_eq!(b.intersection_area(&a), 25.0);
    }

    #[test]
    fn point_box_is_degenerate() {
        let p: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(3.0, 3.0, 3.0, 3.0);
        assert!(p.is_degenerate());
        assert!(p.is_ordered());
    }

    #[test]
    fn non_finite_coordinates_detected() {
        let b: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, f64::NAN, 1.0, 1.0);
        assert!(!b.is_finite());
    }

    #[test]
    fn normalize_and_back() {
        let b: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(64.0, 48.0, 320.0, 240.0);
        let n = b.to_normalized(640.0, 480.0);
        assert_eq!(n.to_array(), [0.1, 0.1, 0.5, 0.5]);
        assert_eq!(n.to_pixel(640.0, 480.0), b);
    }

    #[test]
    fn deserializes_named_and_array_forms() {
        let named: BBoxXYXY<Pixel> =
            serde_json::from_str(r#"{"xmin":1,"ymin":2,"xmax":3,"ymax":4}"#).unwrap();
        let array: BBoxXYXY<Pixel> = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(named, array);
        assert_eq!(
            serde_json::to_string(&array).unwrap(),
            r#"{"xmin":1.0,"ymin":2.0,"xmax":3.0,"ymax":4.0}"#
        );
    }
}
