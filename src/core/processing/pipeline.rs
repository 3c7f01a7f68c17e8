use tracing::{info, warn};

use crate::core::buffer::PixelBuffer;
use crate::core::params::ProcessingOptions;
use crate::core::processing::crop::CropResolver;
use crate::core::processing::enhance::Enhancer;
use crate::core::processing::resize::resize_to_height;
use crate::error::Result;

/// One image to transform.
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub name: String,
    pub source: PixelBuffer,
    pub options: ProcessingOptions,
}

impl ImageJob {
    pub fn new(name: impl Into<String>, source: PixelBuffer, options: ProcessingOptions) -> Self {
        Self {
            name: name.into(),
            source,
            options,
        }
    }
}

/// Transform output, named after its job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub name: String,
    pub buffer: PixelBuffer,
}

/// Crop -> optional enhance -> resize.
///
/// Holds no batch state; every call works only on what it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    pub cropper: CropResolver,
    pub enhancer: Enhancer,
}

impl Pipeline {
    pub fn new(cropper: CropResolver, enhancer: Enhancer) -> Self {
        Self { cropper, enhancer }
    }

    /// Run the stage chain on one buffer.
    pub fn transform(&self, source: PixelBuffer, options: &ProcessingOptions) -> Result<PixelBuffer> {
        let mut buffer = self.cropper.crop(source, options.tolerance)?;
        if options.enhance {
            buffer = self.enhancer.apply(&buffer)?;
        }
        resize_to_height(buffer, options.target_height)
    }

    pub fn process_job(&self, job: ImageJob) -> Result<ProcessedImage> {
        let ImageJob {
            name,
            source,
            options,
        } = job;
        let buffer = self.transform(source, &options)?;
        info!(
            "Processed {}: {}x{}",
            name,
            buffer.width(),
            buffer.height()
        );
        Ok(ProcessedImage { name, buffer })
    }

    /// Process jobs one at a time in input order. A failing job is logged and
    /// left out; the rest of the batch carries on.
    pub fn process(&self, jobs: Vec<ImageJob>) -> Vec<ProcessedImage> {
        let mut results = Vec::with_capacity(jobs.len());
        for job in jobs {
            let name = job.name.clone();
            match self.process_job(job) {
                Ok(image) => results.push(image),
                Err(e) => warn!("Error processing {}: {}", name, e),
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Tolerance};

    const MAT: Color = Color::new(245, 245, 240, 255);

    fn framed(w: u32, h: u32, border: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| {
            if x < border || y < border || x >= w - border || y >= h - border {
                MAT
            } else {
                Color::new((x % 200) as u8, (y % 200) as u8, 90, 255)
            }
        })
        .unwrap()
    }

    fn opts(enhance: bool, target_height: u32) -> ProcessingOptions {
        ProcessingOptions {
            tolerance: Tolerance(6),
            enhance,
            target_height,
        }
    }

    #[test]
    fn crop_then_resize() {
        // 20px frame -> 30px inset -> 160x100 interior -> scaled to 50 tall
        let out = Pipeline::default()
            .transform(framed(220, 160, 20), &opts(false, 50))
            .unwrap();
        assert_eq!(out.dimensions(), (80, 50));
    }

    #[test]
    fn enhance_doubles_before_resize() {
        let pipeline = Pipeline::default();
        let cropped = pipeline
            .cropper
            .crop(framed(220, 160, 20), Tolerance(6))
            .unwrap();
        assert_eq!(cropped.dimensions(), (160, 100));
        let enhanced = pipeline.enhancer.apply(&cropped).unwrap();
        assert_eq!(enhanced.dimensions(), (320, 200));

        // target equal to the enhanced height means the resize is a no-op
        let out = pipeline
            .transform(framed(220, 160, 20), &opts(true, 200))
            .unwrap();
        assert_eq!(out.dimensions(), (320, 200));

        let out = pipeline
            .transform(framed(220, 160, 20), &opts(false, 200))
            .unwrap();
        assert_eq!(out.dimensions(), (320, 200));
    }

    #[test]
    fn results_keep_input_order_and_names() {
        let jobs: Vec<ImageJob> = (0..6)
            .map(|i| {
                ImageJob::new(
                    format!("scan-{i}.jpg"),
                    framed(100 + i * 10, 90, 15),
                    opts(i % 2 == 0, 40),
                )
            })
            .collect();
        let out = Pipeline::default().process(jobs);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["scan-0.jpg", "scan-1.jpg", "scan-2.jpg", "scan-3.jpg", "scan-4.jpg", "scan-5.jpg"]
        );
        assert!(out.iter().all(|p| p.buffer.height() == 40));
    }

    #[test]
    fn failing_job_is_omitted() {
        let jobs = vec![
            ImageJob::new("a", framed(80, 80, 10), opts(false, 20)),
            ImageJob::new("b", framed(80, 80, 10), opts(false, 0)),
            ImageJob::new("c", framed(80, 80, 10), opts(false, 20)),
        ];
        let out = Pipeline::default().process(jobs);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }
}
