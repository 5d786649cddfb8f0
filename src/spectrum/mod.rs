//! Frequency-domain engine for fourierpaint.
//!
//! Owns everything numeric: complex fields, the radix-2 transform, frequency
//! centering, the mapping from the magnified edit view to full-resolution
//! bins, the Gaussian bump editor and the pure read functions the screens and
//! audio output draw from.

pub mod editor;
pub mod field;
pub mod readout;
pub mod session;
pub mod shift;
pub mod transform;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use editor::{Editor1D, Editor2D, Spectrum1D, Spectrum2D};
pub use session::{PaintSession, RepeatingTask};
pub use view::{sigma_from_slider, StripGeometry, ViewGeometry};
