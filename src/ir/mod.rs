//! Box and detection types shared by every boxdedup stage.
//!
//! Boxes are stored in XYXY order, tagged at the type level with the
//! coordinate frame they live in ([`Pixel`] or [`Normalized`]) so a
//! normalized box cannot be compared against a pixel box by accident.
//! Construction is permissive: reversed or non-finite boxes can be
//! represented, and it is up to [`crate::validation`] (or strict
//! resolution) to reject them.
//!
//! # Example
//!
//! ```
//! use boxdedup::ir::{BBoxXYXY, Detection, ImageDetections, Pixel};
//!
//! let image = ImageDetections::new("cells_001.png")
//!     .with_size(640, 480)
//!     .with_detection(Detection::new(
//!         BBoxXYXY::<Pixel>::from_xyxy(10.0, 20.0, 100.0, 200.0),
//!         0.93,
//!     ));
//!
//! assert_eq!(image.boxes().len(), 1);
//! ```

mod bbox;
pub mod io_json;
mod model;
mod space;

pub use bbox::BBoxXYXY;
pub use model::{Detection, DetectionFile, ImageDetections};
pub use space::{Normalized, Pixel};
