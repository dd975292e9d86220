//! Trait for object detection inference backends.

use crate::detection::OutputShape;

/// Trait for object detection inference backends.
///
/// Implement this trait to connect a detection model to the [`Pipeline`].
/// The engine owns model loading and input preprocessing; the pipeline only
/// sees the flat output tensor.
///
/// # Example
///
/// ```ignore
/// use roadtrack::{InferenceEngine, OutputShape};
///
/// struct MyModel {
///     // Your interpreter here
/// }
///
/// impl InferenceEngine for MyModel {
///     type Error = std::io::Error;
///
///     fn output_shape(&self) -> OutputShape {
///         OutputShape::new(84, 8400)
///     }
///
///     fn infer(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<f32>, Self::Error> {
///         // Run inference and return the `[1, channels, elements]` output
///         Ok(vec![0.0; 84 * 8400])
///     }
/// }
/// ```
///
/// [`Pipeline`]: crate::integration::Pipeline
pub trait InferenceEngine {
    /// Error type for inference failures.
    type Error;

    /// Layout of the output tensor, fixed for the lifetime of the model.
    fn output_shape(&self) -> OutputShape;

    /// Run inference on raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The output tensor flattened in `channels × elements` order.
    fn infer(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<f32>, Self::Error>;
}
